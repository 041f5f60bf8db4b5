use actix_web::{HttpResponse, Result as ActixResult};
use std::path::Path;

use super::{error_response, store};
use crate::config::AppConfig;
use crate::utils::download::file_response;

pub async fn download_file(category: &str, name: &str) -> ActixResult<HttpResponse> {
    let config = &AppConfig::get().storage;
    let dir = match store::category_dir(Path::new(&config.root), category, &config.categories).await
    {
        Ok(dir) => dir,
        Err(e) => return Ok(error_response(&e)),
    };

    match store::read_file(&dir, name).await {
        Ok(data) => Ok(file_response(name, "application/octet-stream", data)),
        Err(e) => Ok(error_response(&e)),
    }
}
