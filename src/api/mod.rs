pub mod download;
pub mod form;
pub mod process;

pub use download::{handle_download_array, __path_handle_download_array};
pub use form::{read_upload, ProcessForm, Upload};
pub use process::{handle_process, handle_process_original};
pub use process::{__path_handle_process, __path_handle_process_original};
