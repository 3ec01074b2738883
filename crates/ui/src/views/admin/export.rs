use std::path::PathBuf;

use dioxus::prelude::*;

use services::{ExportError, ExportedPdf};

use crate::views::{toast_error, toast_success};
use crate::vm::Toasts;

fn save_pdf(pdf: &ExportedPdf) -> std::io::Result<PathBuf> {
    let path = std::env::current_dir()?.join(&pdf.file_name);
    std::fs::write(&path, &pdf.bytes)?;
    Ok(path)
}

/// Write a finished export next to the working directory and toast the outcome.
pub(super) fn finish_export(toasts: Signal<Toasts>, result: Result<ExportedPdf, ExportError>) {
    match result {
        Ok(pdf) => match save_pdf(&pdf) {
            Ok(path) => {
                log::info!("saved {} bytes to {}", pdf.bytes.len(), path.display());
                toast_success(toasts, "PDF generated successfully");
            }
            Err(err) => {
                log::warn!("could not save {}: {err}", pdf.file_name);
                toast_error(toasts, "Error generating PDF. Please try again.");
            }
        },
        Err(ExportError::NoQuestions) => {
            toast_error(toasts, "No questions available for PDF generation");
        }
        Err(err) => {
            log::warn!("pdf export failed: {err}");
            toast_error(toasts, "Error generating PDF. Please try again.");
        }
    }
}
