pub mod delete;
pub mod export;
pub mod grading;
pub mod import;
pub mod list;
pub mod template;

use actix_multipart::Multipart;
use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::cache::ObjectCache;
use crate::models::questions::requests::{QuestionListParams, StorageImportRequest};
use crate::storage::Storage;

pub struct QuestionService {
    storage: Option<Arc<dyn Storage>>,
    cache: Option<Arc<dyn ObjectCache>>,
}

impl QuestionService {
    pub fn new_lazy() -> Self {
        Self {
            storage: None,
            cache: None,
        }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> ActixResult<Arc<dyn Storage>> {
        match &self.storage {
            Some(storage) => Ok(storage.clone()),
            None => super::storage_from_request(request),
        }
    }

    pub(crate) fn get_cache(&self, request: &HttpRequest) -> ActixResult<Arc<dyn ObjectCache>> {
        match &self.cache {
            Some(cache) => Ok(cache.clone()),
            None => super::cache_from_request(request),
        }
    }

    // 上传答题卡导入
    pub async fn import_uploaded(
        &self,
        request: &HttpRequest,
        payload: Multipart,
    ) -> ActixResult<HttpResponse> {
        import::import_uploaded(self, request, payload).await
    }

    // 从外部存储导入
    pub async fn import_from_storage(
        &self,
        request: &HttpRequest,
        body: StorageImportRequest,
    ) -> ActixResult<HttpResponse> {
        import::import_from_storage(self, request, body).await
    }

    pub async fn list_questions(
        &self,
        request: &HttpRequest,
        query: QuestionListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_questions(self, request, query).await
    }

    // id 为空时删除全部
    pub async fn delete_questions(
        &self,
        request: &HttpRequest,
        id: Option<i64>,
    ) -> ActixResult<HttpResponse> {
        delete::delete_questions(self, request, id).await
    }

    pub async fn export_questions(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        export::export_questions(self, request).await
    }

    pub async fn download_template(&self, kind: &str) -> ActixResult<HttpResponse> {
        template::download_template(kind).await
    }
}
