use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};

use crate::config::AppConfig;
use crate::models::system::responses::SystemInfoResponse;
use crate::models::{ApiResponse, AppStartTime};

pub struct SystemService;

impl SystemService {
    pub fn new_lazy() -> Self {
        Self
    }

    pub(crate) fn get_config(&self) -> &AppConfig {
        AppConfig::get()
    }

    // 系统信息（只读）
    pub async fn get_info(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        let config = self.get_config();
        let started_at = request
            .app_data::<web::Data<AppStartTime>>()
            .map(|t| t.start_datetime)
            .unwrap_or_else(chrono::Utc::now);

        let response = SystemInfoResponse {
            system_name: config.app.system_name.clone(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            environment: config.app.environment.clone(),
            admin_identity: config.grading.admin_identity.clone(),
            max_file_size: config.storage.max_size as u64,
            storage_categories: config.storage.categories.clone(),
            started_at,
            uptime_seconds: chrono::Utc::now()
                .signed_duration_since(started_at)
                .num_seconds(),
        };

        Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功")))
    }
}
