//! Services module
//!
//! Orchestration collaborators consumed by the handlers: Telegram file
//! resolution/download, image preparation, and the OCR engine binding.

pub mod files;
pub mod imaging;
pub mod ocr;

// Re-export commonly used services
pub use files::FileService;
pub use imaging::ImagingService;
pub use ocr::OcrService;

use teloxide::Bot;

use crate::config::Settings;
use crate::utils::errors::Result;

/// Service factory for creating and managing all services
#[derive(Clone)]
pub struct ServiceFactory {
    pub file_service: FileService,
    pub imaging_service: ImagingService,
    pub ocr_service: OcrService,
}

impl ServiceFactory {
    /// Create a new ServiceFactory with all services initialized
    pub fn new(bot: Bot, settings: &Settings) -> Result<Self> {
        let file_service = FileService::new(bot, settings)?;
        let imaging_service = ImagingService::new();
        let ocr_service = OcrService::new(&settings.ocr);

        Ok(Self {
            file_service,
            imaging_service,
            ocr_service,
        })
    }
}
