use crate::domain::model::Doctor;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::path::Path;
use std::time::Duration;

/// Where the doctor list comes from.
#[async_trait]
pub trait DoctorSource: Send + Sync {
    async fn fetch_all(&self) -> Result<Vec<Doctor>>;

    /// Human-readable origin, used in logs.
    fn describe(&self) -> String;
}

pub trait Storage: Send + Sync {
    fn write_file(
        &self,
        path: &Path,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}

pub trait ConfigProvider: Send + Sync {
    fn endpoint(&self) -> &str;
    fn timeout(&self) -> Option<Duration>;
    fn specialty_options(&self) -> Vec<String>;
    fn placeholder_photo(&self) -> &str;
    fn suggestion_limit(&self) -> usize;
    fn min_query_length(&self) -> usize;
}
