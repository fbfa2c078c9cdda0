//! Multipart-нагрузки для ресурсов с изображениями: альбомы, фотографии и
//! сертификаты отправляются формой `multipart/form-data`, а не JSON.

use std::fmt;

use chrono::NaiveDate;
use reqwest::multipart::{Form, Part};

use crate::error::{PortfolioClientError, PortfolioClientResult};
use crate::models::CertificateKind;

#[derive(Clone)]
/// Файл изображения для загрузки.
pub struct ImageUpload {
    /// Имя файла, передаваемое серверу.
    pub file_name: String,
    /// MIME-тип, например `image/jpeg`.
    pub mime_type: String,
    /// Содержимое файла.
    pub bytes: Vec<u8>,
}

impl fmt::Debug for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageUpload")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl ImageUpload {
    /// Создаёт загрузку с явным MIME-типом.
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Создаёт загрузку, определяя MIME-тип по расширению файла.
    pub fn from_file_name(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_for_file_name(&file_name).to_string();
        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    fn into_part(self) -> PortfolioClientResult<Part> {
        let Self {
            file_name,
            mime_type,
            bytes,
        } = self;
        Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(&mime_type)
            .map_err(|err| {
                PortfolioClientError::InvalidRequest(format!("invalid mime type {mime_type}: {err}"))
            })
    }
}

fn mime_for_file_name(file_name: &str) -> &'static str {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match extension.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "avif" => "image/avif",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone)]
/// Данные для создания альбома.
pub struct NewAlbum {
    /// Название.
    pub name: String,
    /// Описание.
    pub description: String,
    /// Обложка.
    pub cover_image: ImageUpload,
}

#[derive(Debug, Clone)]
/// Данные для загрузки фотографии в альбом.
pub struct NewPhoto {
    /// Идентификатор альбома.
    pub album: i64,
    /// Изображение.
    pub image: ImageUpload,
    /// Подпись.
    pub caption: Option<String>,
}

#[derive(Debug, Clone)]
/// Данные для создания сертификата.
pub struct NewCertificate {
    /// Название.
    pub title: String,
    /// Кем выдан.
    pub issuer: String,
    /// Вид.
    pub cert_type: CertificateKind,
    /// Изображение.
    pub image: ImageUpload,
    /// Ссылка для проверки.
    pub credential_url: Option<String>,
    /// Дата выдачи.
    pub issue_date: NaiveDate,
}

impl NewAlbum {
    pub(crate) fn into_form(self) -> PortfolioClientResult<Form> {
        Ok(Form::new()
            .text("name", self.name)
            .text("description", self.description)
            .part("cover_image", self.cover_image.into_part()?))
    }
}

impl NewPhoto {
    pub(crate) fn into_form(self) -> PortfolioClientResult<Form> {
        let mut form = Form::new()
            .text("album", self.album.to_string())
            .part("image", self.image.into_part()?);
        if let Some(caption) = self.caption {
            form = form.text("caption", caption);
        }
        Ok(form)
    }
}

impl NewCertificate {
    pub(crate) fn into_form(self) -> PortfolioClientResult<Form> {
        let mut form = Form::new()
            .text("title", self.title)
            .text("issuer", self.issuer)
            .text("cert_type", self.cert_type.as_str())
            .text("issue_date", self.issue_date.format("%Y-%m-%d").to_string())
            .part("image", self.image.into_part()?);
        if let Some(url) = self.credential_url {
            form = form.text("credential_url", url);
        }
        Ok(form)
    }
}
