pub mod questions;
pub mod renames;
pub mod storage_files;
pub mod students;
pub mod system;

pub use questions::QuestionService;
pub use renames::RenameService;
pub use storage_files::StorageFileService;
pub use students::StudentService;
pub use system::SystemService;

use actix_web::{HttpRequest, web};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::storage::Storage;

/// 从 app_data 中取出存储句柄
pub(crate) fn storage_from_request(request: &HttpRequest) -> actix_web::Result<Arc<dyn Storage>> {
    request
        .app_data::<web::Data<Arc<dyn Storage>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Storage not found in app data"))
}

/// 从 app_data 中取出缓存句柄
pub(crate) fn cache_from_request(
    request: &HttpRequest,
) -> actix_web::Result<Arc<dyn ObjectCache>> {
    request
        .app_data::<web::Data<Arc<dyn ObjectCache>>>()
        .map(|data| data.get_ref().clone())
        .ok_or_else(|| actix_web::error::ErrorInternalServerError("Cache not found in app data"))
}
