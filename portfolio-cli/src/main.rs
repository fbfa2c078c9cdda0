use std::path::{Path, PathBuf};
use std::process;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use portfolio_client::{
    BlogPostPatch, CertificateKind, ContactSubmission, ImageUpload, NewAlbum, NewBlogPost,
    NewCertificate, NewPhoto, NewProject, PortfolioClient, PortfolioClientError, ProjectPatch,
    SessionContext,
};
use serde::Serialize;
use tracing::debug;

mod logging;
mod settings;

use logging::init_logging;
use settings::Settings;

#[derive(Debug, Parser)]
#[command(
    name = "portfolio-cli",
    version,
    about = "CLI администратора для content API портфолио"
)]
struct Cli {
    /// Базовый URL API, например `http://localhost:8000/api`.
    #[arg(long, global = true)]
    server: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Вход администратора.
    Login {
        #[arg(long)]
        username: String,
        #[arg(long)]
        password: String,
    },
    /// Выход: удаляет сохранённую сессию.
    Logout,
    /// Показывает пользователя сохранённой сессии.
    Whoami,
    /// Посты блога.
    Blogs {
        #[command(subcommand)]
        action: BlogAction,
    },
    /// Проекты.
    Projects {
        #[command(subcommand)]
        action: ProjectAction,
    },
    /// Фотоальбомы.
    Albums {
        #[command(subcommand)]
        action: AlbumAction,
    },
    /// Фотографии.
    Photos {
        #[command(subcommand)]
        action: PhotoAction,
    },
    /// Сертификаты и бейджи.
    Certificates {
        #[command(subcommand)]
        action: CertificateAction,
    },
    /// Заявки формы обратной связи.
    Contacts {
        #[command(subcommand)]
        action: ContactAction,
    },
    /// Цитата дня.
    Quote,
}

#[derive(Debug, Subcommand)]
enum BlogAction {
    /// Список постов.
    List,
    /// Посты для главной.
    Featured,
    /// Пост по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Создание поста.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        excerpt: String,
        #[arg(long)]
        content: String,
        #[arg(long)]
        category: String,
        #[arg(long)]
        read_time: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        featured: bool,
    },
    /// Частичное обновление поста: меняются только переданные поля.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        excerpt: Option<String>,
        #[arg(long)]
        content: Option<String>,
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        read_time: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        featured: Option<bool>,
    },
    /// Удаление поста.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum ProjectAction {
    /// Список проектов.
    List,
    /// Проекты для главной.
    Featured,
    /// Проект по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Создание проекта.
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        /// Технологии через запятую.
        #[arg(long = "tech", value_delimiter = ',')]
        technologies: Vec<String>,
        #[arg(long)]
        github_url: Option<String>,
        #[arg(long)]
        live_url: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        featured: bool,
    },
    /// Частичное обновление проекта.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long = "tech", value_delimiter = ',')]
        technologies: Option<Vec<String>>,
        #[arg(long)]
        github_url: Option<String>,
        #[arg(long)]
        live_url: Option<String>,
        #[arg(long)]
        image: Option<String>,
        #[arg(long)]
        featured: Option<bool>,
    },
    /// Удаление проекта.
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum AlbumAction {
    /// Список альбомов.
    List,
    /// Альбом по id вместе с фотографиями.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Создание альбома (требует вход).
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        /// Файл обложки.
        #[arg(long)]
        cover: PathBuf,
    },
    /// Удаление альбома (требует вход).
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum PhotoAction {
    /// Список фотографий.
    List,
    /// Загрузка фотографии в альбом (требует вход).
    Create {
        #[arg(long)]
        album: i64,
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        caption: Option<String>,
    },
    /// Удаление фотографии (требует вход).
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum CertificateAction {
    /// Список сертификатов.
    List,
    /// Сертификат по id.
    Get {
        #[arg(long)]
        id: i64,
    },
    /// Создание сертификата (требует вход).
    Create {
        #[arg(long)]
        title: String,
        #[arg(long)]
        issuer: String,
        /// `badge` или `certificate`.
        #[arg(long)]
        kind: CertificateKind,
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        credential_url: Option<String>,
        /// Дата выдачи в формате `YYYY-MM-DD`.
        #[arg(long)]
        issue_date: NaiveDate,
    },
    /// Удаление сертификата (требует вход).
    Delete {
        #[arg(long)]
        id: i64,
    },
}

#[derive(Debug, Subcommand)]
enum ContactAction {
    /// Список заявок (требует вход).
    List,
    /// Отправка заявки.
    Submit {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        message: String,
    },
}

#[tokio::main]
async fn main() {
    if let Err(err) = run().await {
        eprintln!("Ошибка: {err:#}");
        process::exit(1);
    }
}

async fn run() -> Result<()> {
    dotenvy::dotenv().ok();
    let settings = Settings::from_env()?;
    init_logging(&settings.log_level)?;

    let cli = Cli::parse();
    debug!(session_dir = %settings.session_dir.display(), "loading session");

    let session = SessionContext::in_dir(settings.session_dir.clone());
    let client = PortfolioClient::new(settings.client_config(cli.server), session)
        .map_err(map_client_error)?;

    match cli.command {
        Command::Login { username, password } => {
            client
                .login(&username, &password)
                .await
                .map_err(map_client_error)
                .context("вход не выполнен")?;
            println!(
                "Вход выполнен: {username} (сессия в {})",
                settings.session_dir.display()
            );
        }
        Command::Logout => {
            client.logout().map_err(map_client_error)?;
            println!("Сессия удалена");
        }
        Command::Whoami => match client.session().user().map_err(map_client_error)? {
            Some(user) => println!("{}", user.username),
            None => println!("Вход не выполнен"),
        },
        Command::Blogs { action } => run_blogs(&client, action).await?,
        Command::Projects { action } => run_projects(&client, action).await?,
        Command::Albums { action } => run_albums(&client, action).await?,
        Command::Photos { action } => run_photos(&client, action).await?,
        Command::Certificates { action } => run_certificates(&client, action).await?,
        Command::Contacts { action } => run_contacts(&client, action).await?,
        Command::Quote => {
            let quote = client.daily_quote().await.map_err(map_client_error)?;
            println!("«{}» — {}", quote.text, quote.author);
        }
    }

    Ok(())
}

async fn run_blogs(client: &PortfolioClient, action: BlogAction) -> Result<()> {
    let blogs = client.blogs();
    match action {
        BlogAction::List => print_record("Посты", &blogs.list().await.map_err(map_client_error)?),
        BlogAction::Featured => print_record(
            "Посты для главной",
            &blogs.featured().await.map_err(map_client_error)?,
        ),
        BlogAction::Get { id } => print_record("Пост", &blogs.get(id).await.map_err(map_client_error)?),
        BlogAction::Create {
            title,
            excerpt,
            content,
            category,
            read_time,
            image,
            featured,
        } => {
            let payload = NewBlogPost {
                title,
                excerpt,
                content,
                category,
                read_time,
                image,
                is_featured: featured,
            };
            let post = blogs.create(payload).await.map_err(map_client_error)?;
            print_record("Пост создан", &post)
        }
        BlogAction::Update {
            id,
            title,
            excerpt,
            content,
            category,
            read_time,
            image,
            featured,
        } => {
            let patch = BlogPostPatch {
                title,
                excerpt,
                content,
                category,
                read_time,
                image,
                is_featured: featured,
            };
            let post = blogs.update(id, &patch).await.map_err(map_client_error)?;
            print_record("Пост обновлён", &post)
        }
        BlogAction::Delete { id } => {
            blogs.delete(id).await.map_err(map_client_error)?;
            println!("Пост удалён: id={id}");
            Ok(())
        }
    }
}

async fn run_projects(client: &PortfolioClient, action: ProjectAction) -> Result<()> {
    let projects = client.projects();
    match action {
        ProjectAction::List => print_record(
            "Проекты",
            &projects.list().await.map_err(map_client_error)?,
        ),
        ProjectAction::Featured => print_record(
            "Проекты для главной",
            &projects.featured().await.map_err(map_client_error)?,
        ),
        ProjectAction::Get { id } => print_record(
            "Проект",
            &projects.get(id).await.map_err(map_client_error)?,
        ),
        ProjectAction::Create {
            title,
            description,
            technologies,
            github_url,
            live_url,
            image,
            featured,
        } => {
            let payload = NewProject {
                title,
                description,
                technologies,
                github_url,
                live_url,
                image,
                is_featured: featured,
            };
            let project = projects.create(payload).await.map_err(map_client_error)?;
            print_record("Проект создан", &project)
        }
        ProjectAction::Update {
            id,
            title,
            description,
            technologies,
            github_url,
            live_url,
            image,
            featured,
        } => {
            let patch = ProjectPatch {
                title,
                description,
                technologies,
                github_url,
                live_url,
                image,
                is_featured: featured,
            };
            let project = projects.update(id, &patch).await.map_err(map_client_error)?;
            print_record("Проект обновлён", &project)
        }
        ProjectAction::Delete { id } => {
            projects.delete(id).await.map_err(map_client_error)?;
            println!("Проект удалён: id={id}");
            Ok(())
        }
    }
}

async fn run_albums(client: &PortfolioClient, action: AlbumAction) -> Result<()> {
    let albums = client.albums();
    match action {
        AlbumAction::List => print_record("Альбомы", &albums.list().await.map_err(map_client_error)?),
        AlbumAction::Get { id } => {
            print_record("Альбом", &albums.get(id).await.map_err(map_client_error)?)
        }
        AlbumAction::Create {
            name,
            description,
            cover,
        } => {
            let payload = NewAlbum {
                name,
                description,
                cover_image: read_image(&cover).await?,
            };
            let album = albums.create(payload).await.map_err(map_client_error)?;
            print_record("Альбом создан", &album)
        }
        AlbumAction::Delete { id } => {
            albums.delete(id).await.map_err(map_client_error)?;
            println!("Альбом удалён: id={id}");
            Ok(())
        }
    }
}

async fn run_photos(client: &PortfolioClient, action: PhotoAction) -> Result<()> {
    let photos = client.photos();
    match action {
        PhotoAction::List => print_record(
            "Фотографии",
            &photos.list().await.map_err(map_client_error)?,
        ),
        PhotoAction::Create {
            album,
            image,
            caption,
        } => {
            let payload = NewPhoto {
                album,
                image: read_image(&image).await?,
                caption,
            };
            let photo = photos.create(payload).await.map_err(map_client_error)?;
            print_record("Фотография загружена", &photo)
        }
        PhotoAction::Delete { id } => {
            photos.delete(id).await.map_err(map_client_error)?;
            println!("Фотография удалена: id={id}");
            Ok(())
        }
    }
}

async fn run_certificates(client: &PortfolioClient, action: CertificateAction) -> Result<()> {
    let certificates = client.certificates();
    match action {
        CertificateAction::List => print_record(
            "Сертификаты",
            &certificates.list().await.map_err(map_client_error)?,
        ),
        CertificateAction::Get { id } => print_record(
            "Сертификат",
            &certificates.get(id).await.map_err(map_client_error)?,
        ),
        CertificateAction::Create {
            title,
            issuer,
            kind,
            image,
            credential_url,
            issue_date,
        } => {
            let payload = NewCertificate {
                title,
                issuer,
                cert_type: kind,
                image: read_image(&image).await?,
                credential_url,
                issue_date,
            };
            let certificate = certificates
                .create(payload)
                .await
                .map_err(map_client_error)?;
            print_record("Сертификат создан", &certificate)
        }
        CertificateAction::Delete { id } => {
            certificates.delete(id).await.map_err(map_client_error)?;
            println!("Сертификат удалён: id={id}");
            Ok(())
        }
    }
}

async fn run_contacts(client: &PortfolioClient, action: ContactAction) -> Result<()> {
    let contacts = client.contacts();
    match action {
        ContactAction::List => print_record(
            "Заявки",
            &contacts.list().await.map_err(map_client_error)?,
        ),
        ContactAction::Submit {
            name,
            email,
            phone,
            message,
        } => {
            let receipt = contacts
                .create(ContactSubmission {
                    name,
                    email,
                    phone,
                    message,
                })
                .await
                .map_err(map_client_error)?;
            println!("Заявка отправлена: id={}", receipt.id);
            Ok(())
        }
    }
}

async fn read_image(path: &Path) -> Result<ImageUpload> {
    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("не удалось прочитать {}", path.display()))?;
    let file_name = image_file_name(path)?;
    Ok(ImageUpload::from_file_name(file_name, bytes))
}

fn image_file_name(path: &Path) -> Result<String> {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .with_context(|| format!("в пути {} нет имени файла", path.display()))
}

fn print_record<T: Serialize>(title: &str, record: &T) -> Result<()> {
    let rendered = serde_json::to_string_pretty(record).context("не удалось вывести запись")?;
    println!("{title}");
    println!("{rendered}");
    Ok(())
}

fn map_client_error(err: PortfolioClientError) -> anyhow::Error {
    let message = match err {
        PortfolioClientError::Auth(message) => format!(
            "ошибка авторизации: {message}; выполните `portfolio-cli login ...`"
        ),
        PortfolioClientError::NotFound => "ресурс не найден".to_string(),
        PortfolioClientError::Api {
            status,
            status_text,
            detail: Some(detail),
        } => format!("сервер вернул {status} {status_text}: {detail}"),
        PortfolioClientError::Api {
            status,
            status_text,
            detail: None,
        } => format!("сервер вернул {status} {status_text}"),
        PortfolioClientError::Transport(err) => format!("ошибка соединения: {err}"),
        PortfolioClientError::Decode(message) => format!("неожиданный ответ сервера: {message}"),
        PortfolioClientError::InvalidRequest(message) => format!("некорректный запрос: {message}"),
        PortfolioClientError::Storage(err) => format!("ошибка хранилища сессии: {err}"),
    };
    anyhow::anyhow!(message)
}
