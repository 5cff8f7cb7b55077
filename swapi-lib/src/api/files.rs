//! Files and file directories.

use reqwest::Method;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use serde_json::Value;
use serde_json::json;

use super::Resource;
use super::resource::resource_handle;
use crate::error::Error;
use crate::request::ApiRequest;

/// One file of a multipart upload.
///
/// # Example
///
/// ```
/// use swapi_lib::api::UploadFile;
///
/// let file = UploadFile::new("report.pdf", b"%PDF-1.7".to_vec()).mime("application/pdf");
/// assert_eq!(file.file_name(), "report.pdf");
/// ```
#[derive(Debug, Clone)]
pub struct UploadFile {
    field: String,
    file_name: String,
    bytes: Vec<u8>,
    mime: Option<String>,
}

impl UploadFile {
    /// Creates a file sent under the form field `file`.
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            field: "file".to_string(),
            file_name: file_name.into(),
            bytes: bytes.into(),
            mime: None,
        }
    }

    /// Sends the file under a different form field name.
    pub fn field(mut self, field: impl Into<String>) -> Self {
        self.field = field.into();
        self
    }

    /// Sets the content type of the file.
    pub fn mime(mut self, mime: impl Into<String>) -> Self {
        self.mime = Some(mime.into());
        self
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    fn into_part(self) -> Result<(String, Part), Error> {
        let mut part = Part::bytes(self.bytes).file_name(self.file_name);
        if let Some(mime) = &self.mime {
            part = part.mime_str(mime).map_err(Error::HttpClient)?;
        }
        Ok((self.field, part))
    }
}

resource_handle!(
    /// Stored files (`/api/files`).
    Files
);

impl<'a> Files<'a> {
    /// File directories (`/api/file_directories`).
    pub fn directories(&self) -> Resource<'a> {
        Resource::new(self.client(), "/api/file_directories")
    }

    /// Uploads files as `multipart/form-data` (`POST /upload?mode=`).
    ///
    /// Uploads are never retried after a 401, since the form body cannot be
    /// replayed.
    ///
    /// # Example
    ///
    /// ```ignore
    /// use swapi_lib::api::UploadFile;
    ///
    /// let bytes = std::fs::read("photo.jpg")?;
    /// let stored = client
    ///     .files()
    ///     .upload(vec![UploadFile::new("photo.jpg", bytes).mime("image/jpeg")], 0)
    ///     .await?;
    /// ```
    pub async fn upload(&self, files: Vec<UploadFile>, mode: u32) -> Result<Value, Error> {
        let mut form = Form::new();
        for file in files {
            let (field, part) = file.into_part()?;
            form = form.part(field, part);
        }
        let request = ApiRequest::new(Method::POST, format!("{}/upload", self.path()))
            .param("mode", mode.to_string())
            .multipart(form);
        self.client().execute(request).await
    }

    /// Lets the server download files from URLs (`POST /upload_from_urls`).
    pub async fn upload_from_urls<I, S>(&self, urls: I) -> Result<Value, Error>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let urls: Vec<String> = urls.into_iter().map(Into::into).collect();
        self.client()
            .post(&format!("{}/upload_from_urls", self.path()), &json!({ "urls": urls }), None)
            .await
    }
}
