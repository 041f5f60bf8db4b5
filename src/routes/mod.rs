pub mod questions;

pub mod students;

pub mod renames;

pub mod storage_files;

pub mod system;

pub use questions::configure_questions_routes;
pub use renames::configure_renames_routes;
pub use storage_files::configure_storage_files_routes;
pub use students::configure_students_routes;
pub use system::configure_system_routes;
