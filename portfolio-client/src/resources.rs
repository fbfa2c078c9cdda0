//! Ресурсы content API и их возможности.
//!
//! | Ресурс | list | get | featured | create | update | delete |
//! |---|---|---|---|---|---|---|
//! | [`Blogs`] | + | + | + | JSON | + | + |
//! | [`Projects`] | + | + | + | JSON | + | + |
//! | [`Albums`] | + | + | | multipart* | | +* |
//! | [`Photos`] | + | | | multipart* | | +* |
//! | [`Certificates`] | + | + | | multipart* | | +* |
//! | [`Contacts`] | +* | | | JSON | | |
//!
//! `*` требует сохранённую сессию.

use crate::error::PortfolioClientResult;
use crate::http_client::RequestBody;
use crate::models::{
    Album, BlogPost, BlogPostPatch, Certificate, ContactMessage, ContactReceipt,
    ContactSubmission, NewBlogPost, NewProject, Photo, Project, ProjectPatch,
};
use crate::resource::{
    Creatable, Deletable, Featurable, IntoRequestBody, Listable, Resource, Retrievable, Updatable,
};
use crate::upload::{NewAlbum, NewCertificate, NewPhoto};

macro_rules! json_payload {
    ($($payload:ty),+ $(,)?) => {
        $(
            impl IntoRequestBody for $payload {
                fn into_request_body(self) -> PortfolioClientResult<RequestBody> {
                    RequestBody::json(&self)
                }
            }
        )+
    };
}

macro_rules! multipart_payload {
    ($($payload:ty),+ $(,)?) => {
        $(
            impl IntoRequestBody for $payload {
                fn into_request_body(self) -> PortfolioClientResult<RequestBody> {
                    self.into_form().map(RequestBody::Multipart)
                }
            }
        )+
    };
}

json_payload!(NewBlogPost, NewProject, ContactSubmission);
multipart_payload!(NewAlbum, NewPhoto, NewCertificate);

/// Посты блога.
pub struct Blogs;

impl Resource for Blogs {
    const PATH: &'static str = "blogs";
    type Record = BlogPost;
}
impl Listable for Blogs {}
impl Retrievable for Blogs {}
impl Featurable for Blogs {}
impl Creatable for Blogs {
    type Payload = NewBlogPost;
    type Created = BlogPost;
}
impl Updatable for Blogs {
    type Patch = BlogPostPatch;
}
impl Deletable for Blogs {}

/// Проекты.
pub struct Projects;

impl Resource for Projects {
    const PATH: &'static str = "projects";
    type Record = Project;
}
impl Listable for Projects {}
impl Retrievable for Projects {}
impl Featurable for Projects {}
impl Creatable for Projects {
    type Payload = NewProject;
    type Created = Project;
}
impl Updatable for Projects {
    type Patch = ProjectPatch;
}
impl Deletable for Projects {}

/// Фотоальбомы.
pub struct Albums;

impl Resource for Albums {
    const PATH: &'static str = "albums";
    type Record = Album;
}
impl Listable for Albums {}
impl Retrievable for Albums {}
impl Creatable for Albums {
    type Payload = NewAlbum;
    type Created = Album;
    const REQUIRES_SESSION: bool = true;
}
impl Deletable for Albums {
    const REQUIRES_SESSION: bool = true;
}

/// Фотографии.
pub struct Photos;

impl Resource for Photos {
    const PATH: &'static str = "photos";
    type Record = Photo;
}
impl Listable for Photos {}
impl Creatable for Photos {
    type Payload = NewPhoto;
    type Created = Photo;
    const REQUIRES_SESSION: bool = true;
}
impl Deletable for Photos {
    const REQUIRES_SESSION: bool = true;
}

/// Сертификаты и бейджи.
pub struct Certificates;

impl Resource for Certificates {
    const PATH: &'static str = "certificates";
    type Record = Certificate;
}
impl Listable for Certificates {}
impl Retrievable for Certificates {}
impl Creatable for Certificates {
    type Payload = NewCertificate;
    type Created = Certificate;
    const REQUIRES_SESSION: bool = true;
}
impl Deletable for Certificates {
    const REQUIRES_SESSION: bool = true;
}

/// Заявки формы обратной связи. Список доступен только администратору.
pub struct Contacts;

impl Resource for Contacts {
    const PATH: &'static str = "contacts";
    type Record = ContactMessage;
}
impl Listable for Contacts {
    const REQUIRES_SESSION: bool = true;
}
impl Creatable for Contacts {
    type Payload = ContactSubmission;
    type Created = ContactReceipt;
}
