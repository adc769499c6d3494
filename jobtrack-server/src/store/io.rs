// Export and import of the job collection as JSON files.

use std::string::FromUtf8Error;

use log::{info, warn};
use thiserror::Error;

use jobtrack_utils::{
    codec::{decode_jobs, encode_jobs_pretty, DecodeError},
    JobDraft, JobId, JobRecord, Notification,
};

use super::JobStore;
use crate::integrations::{FileHandle, IntegrationError};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("could not read import file: {0}")]
    Read(#[from] IntegrationError),

    #[error("import file is not UTF-8: {0}")]
    Encoding(#[from] FromUtf8Error),

    #[error(transparent)]
    Decode(#[from] DecodeError),
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("could not encode jobs: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("could not write export file: {0}")]
    Write(#[from] IntegrationError),
}

impl JobStore {
    /// The export document for `subset`, or for the whole collection when
    /// `None`: a 2-space indented array in the given order. Identical input
    /// gives byte-identical output.
    pub fn export_json(&self, subset: Option<&[JobRecord]>) -> serde_json::Result<String> {
        encode_jobs_pretty(subset.unwrap_or(self.jobs.as_slice()))
    }

    /// Write the export document through the file transfer under the
    /// configured export file name.
    pub async fn export_jobs(
        &mut self,
        subset: Option<&[JobRecord]>,
    ) -> Result<FileHandle, ExportError> {
        let count = subset.map_or(self.jobs.len(), <[JobRecord]>::len);
        let result = self.write_export(subset).await;
        match &result {
            Ok(handle) => {
                info!("Exported {} job(s) to {}", count, handle);
                self.notifications
                    .show(Notification::success("Jobs exported successfully!"));
            },
            Err(e) => {
                warn!("Export through {} failed: {}", self.files.name(), e);
                self.notifications
                    .show(Notification::error("Error exporting jobs!"));
            },
        }
        result
    }

    /// Export only the records whose ids are listed, in collection order.
    /// Unknown ids are skipped.
    pub async fn export_selected(&mut self, ids: &[JobId]) -> Result<FileHandle, ExportError> {
        let selected: Vec<JobRecord> = self
            .jobs
            .iter()
            .filter(|job| ids.contains(&job.id))
            .cloned()
            .collect();
        self.export_jobs(Some(&selected)).await
    }

    /// Replace the whole collection with the records in the file behind
    /// `handle`, returning how many were imported.
    ///
    /// The collection is only touched once the file has been read, decoded
    /// and normalized; any failure leaves it as it was and shows an error
    /// notification.
    pub async fn import_jobs(&mut self, handle: &FileHandle) -> Result<usize, ImportError> {
        let drafts = match self.read_import(handle).await {
            Ok(drafts) => drafts,
            Err(e) => {
                warn!("Import of {} failed: {}", handle, e);
                self.notifications
                    .show(Notification::error("Error importing jobs!"));
                return Err(e);
            },
        };

        self.jobs = self.normalize_drafts(drafts);
        let count = self.jobs.len();
        info!("Imported {} job(s) from {}", count, handle);

        self.notifications
            .show(Notification::success("Jobs imported successfully!"));
        self.commit();
        Ok(count)
    }

    async fn write_export(&self, subset: Option<&[JobRecord]>) -> Result<FileHandle, ExportError> {
        let document = self.export_json(subset)?;
        let handle = self
            .files
            .write(&self.config.export_filename, document.as_bytes())
            .await?;
        Ok(handle)
    }

    async fn read_import(&self, handle: &FileHandle) -> Result<Vec<JobDraft>, ImportError> {
        let bytes = self.files.read(handle).await?;
        let text = String::from_utf8(bytes)?;
        Ok(decode_jobs(&text)?)
    }
}
