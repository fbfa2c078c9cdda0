use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};

/// Backend отдаёт пустые необязательные поля как `""` или `null`.
fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|raw| !raw.trim().is_empty()))
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Пост блога.
pub struct BlogPost {
    /// Идентификатор поста.
    pub id: i64,
    /// Заголовок.
    pub title: String,
    /// Краткое описание для карточки.
    pub excerpt: String,
    /// Текст поста.
    pub content: String,
    /// URL обложки.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    /// Категория.
    pub category: String,
    /// Метка времени чтения, например `5 min read`.
    pub read_time: String,
    /// Пост выводится на главной.
    #[serde(default)]
    pub is_featured: bool,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
    /// Дата и время последнего изменения (UTC).
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Проект из портфолио.
pub struct Project {
    /// Идентификатор проекта.
    pub id: i64,
    /// Название.
    pub title: String,
    /// Описание.
    pub description: String,
    /// URL превью.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    /// Технологии в порядке, заданном автором.
    #[serde(default)]
    pub technologies: Vec<String>,
    /// Ссылка на исходный код.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub github_url: Option<String>,
    /// Ссылка на работающую версию.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub live_url: Option<String>,
    /// Проект выводится на главной.
    #[serde(default)]
    pub is_featured: bool,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Фотография внутри альбома.
pub struct Photo {
    /// Идентификатор фотографии.
    pub id: i64,
    /// Идентификатор альбома-владельца.
    pub album: i64,
    /// URL изображения.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    /// Подпись.
    #[serde(default)]
    pub caption: String,
    /// Дата и время загрузки (UTC).
    pub uploaded_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Фотоальбом.
pub struct Album {
    /// Идентификатор альбома.
    pub id: i64,
    /// Название.
    pub name: String,
    /// Описание.
    #[serde(default)]
    pub description: String,
    /// URL обложки.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub cover_image: Option<String>,
    /// Фотографии в порядке, отданном сервером.
    #[serde(default)]
    pub photos: Vec<Photo>,
    /// Количество фотографий по данным сервера.
    #[serde(default)]
    pub photo_count: u32,
    /// Дата и время создания (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Вид сертификата.
pub enum CertificateKind {
    /// Онлайн-бейдж.
    Badge,
    /// Сертификат.
    Certificate,
}

impl CertificateKind {
    /// Значение в том виде, в котором его ждёт backend.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Badge => "badge",
            Self::Certificate => "certificate",
        }
    }
}

impl std::str::FromStr for CertificateKind {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "badge" => Ok(Self::Badge),
            "certificate" => Ok(Self::Certificate),
            other => Err(format!("unknown certificate kind: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Сертификат или бейдж.
pub struct Certificate {
    /// Идентификатор.
    pub id: i64,
    /// Название.
    pub title: String,
    /// Кем выдан.
    pub issuer: String,
    /// Вид.
    pub cert_type: CertificateKind,
    /// URL изображения.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub image: Option<String>,
    /// Ссылка для проверки.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub credential_url: Option<String>,
    /// Дата выдачи.
    pub issue_date: NaiveDate,
    /// Дата и время создания записи (UTC).
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Заявка из формы обратной связи.
pub struct ContactSubmission {
    /// Имя отправителя.
    pub name: String,
    /// Email отправителя.
    pub email: String,
    /// Телефон.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Сообщение.
    pub message: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
/// Ответ сервера на отправку заявки.
pub struct ContactReceipt {
    /// Идентификатор сохранённой заявки.
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Сохранённая заявка в админском списке.
pub struct ContactMessage {
    /// Идентификатор заявки.
    pub id: i64,
    /// Имя отправителя.
    pub name: String,
    /// Email отправителя.
    pub email: String,
    /// Телефон.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub phone: Option<String>,
    /// Сообщение.
    pub message: String,
    /// Дата и время отправки (UTC).
    pub submitted_at: DateTime<Utc>,
    /// Заявка прочитана администратором.
    #[serde(default)]
    pub is_read: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Цитата дня.
pub struct Quote {
    /// Идентификатор. У запасной цитаты backend его не передаёт.
    #[serde(default)]
    pub id: Option<i64>,
    /// Текст.
    pub text: String,
    /// Автор.
    pub author: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Данные для создания поста.
pub struct NewBlogPost {
    /// Заголовок.
    pub title: String,
    /// Краткое описание.
    pub excerpt: String,
    /// Текст поста.
    pub content: String,
    /// Категория.
    pub category: String,
    /// Метка времени чтения. Если не задана, backend подставит свою.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    /// URL обложки.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Выводить на главной.
    pub is_featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Частичное обновление поста: в тело попадают только заданные поля.
pub struct BlogPostPatch {
    /// Заголовок.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Краткое описание.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// Текст поста.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    /// Категория.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Метка времени чтения.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub read_time: Option<String>,
    /// URL обложки.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Выводить на главной.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Данные для создания проекта.
pub struct NewProject {
    /// Название.
    pub title: String,
    /// Описание.
    pub description: String,
    /// Технологии.
    pub technologies: Vec<String>,
    /// Ссылка на исходный код.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    /// Ссылка на работающую версию.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    /// URL превью.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Выводить на главной.
    pub is_featured: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
/// Частичное обновление проекта.
pub struct ProjectPatch {
    /// Название.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Описание.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Технологии. Заменяют список целиком.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub technologies: Option<Vec<String>>,
    /// Ссылка на исходный код.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub github_url: Option<String>,
    /// Ссылка на работающую версию.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub live_url: Option<String>,
    /// URL превью.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Выводить на главной.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_featured: Option<bool>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn project_blank_links_decode_as_none() {
        let raw = json!({
            "id": 3,
            "title": "CLI",
            "description": "tool",
            "image": null,
            "technologies": ["Rust", "Tokio"],
            "github_url": "https://github.com/me/cli",
            "live_url": "",
            "is_featured": true,
            "created_at": "2024-05-01T10:00:00.123456Z"
        });

        let project: Project = serde_json::from_value(raw).expect("project should decode");
        assert_eq!(project.image, None);
        assert_eq!(project.live_url, None);
        assert_eq!(project.github_url.as_deref(), Some("https://github.com/me/cli"));
        assert_eq!(project.technologies, vec!["Rust", "Tokio"]);
    }

    #[test]
    fn certificate_decodes_kind_and_date() {
        let raw = json!({
            "id": 1,
            "title": "AWS",
            "issuer": "Amazon",
            "cert_type": "badge",
            "image": "http://cdn/c.png",
            "credential_url": "",
            "issue_date": "2023-11-20",
            "created_at": "2023-11-21T08:00:00Z"
        });

        let cert: Certificate = serde_json::from_value(raw).expect("certificate should decode");
        assert_eq!(cert.cert_type, CertificateKind::Badge);
        assert_eq!(
            cert.issue_date,
            NaiveDate::from_ymd_opt(2023, 11, 20).expect("valid date")
        );
        assert!(cert.credential_url.is_none());
    }

    #[test]
    fn certificate_kind_parses_case_insensitively() {
        assert_eq!("Certificate".parse::<CertificateKind>(), Ok(CertificateKind::Certificate));
        assert!("diploma".parse::<CertificateKind>().is_err());
    }

    #[test]
    fn quote_fallback_without_id_decodes() {
        let raw = json!({"text": "Stay hungry, stay foolish.", "author": "Steve Jobs"});
        let quote: Quote = serde_json::from_value(raw).expect("quote should decode");
        assert_eq!(quote.id, None);
        assert_eq!(quote.author, "Steve Jobs");
    }

    #[test]
    fn blog_patch_serializes_only_set_fields() {
        let patch = BlogPostPatch {
            title: Some("X".to_string()),
            ..Default::default()
        };
        assert_eq!(
            serde_json::to_value(&patch).expect("patch serializes"),
            json!({"title": "X"})
        );
    }

    #[test]
    fn contact_submission_omits_missing_phone() {
        let submission = ContactSubmission {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            phone: None,
            message: "Hi".to_string(),
        };
        let value = serde_json::to_value(&submission).expect("submission serializes");
        assert!(value.get("phone").is_none());
    }

    #[test]
    fn album_without_photos_defaults_to_empty() {
        let raw = json!({
            "id": 9,
            "name": "Alps",
            "cover_image": "http://cdn/alps.jpg",
            "created_at": "2024-01-01T00:00:00Z"
        });
        let album: Album = serde_json::from_value(raw).expect("album should decode");
        assert!(album.photos.is_empty());
        assert_eq!(album.photo_count, 0);
        assert_eq!(album.description, "");
    }
}
