pub mod archive;
pub mod directory;

use actix_multipart::Multipart;
use actix_web::{HttpResponse, Result as ActixResult};

use crate::models::renames::requests::DirectoryRenameRequest;

pub struct RenameService;

impl RenameService {
    pub fn new_lazy() -> Self {
        Self
    }

    // 预览目录重命名
    pub async fn preview(&self, body: DirectoryRenameRequest) -> ActixResult<HttpResponse> {
        directory::handle_preview(body).await
    }

    // 执行目录重命名
    pub async fn apply(&self, body: DirectoryRenameRequest) -> ActixResult<HttpResponse> {
        directory::handle_apply(body).await
    }

    // 上传文件并打包下载
    pub async fn archive(&self, payload: Multipart) -> ActixResult<HttpResponse> {
        archive::handle_archive(payload).await
    }
}
