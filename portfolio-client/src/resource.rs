//! Типизированный интерфейс ресурсов.
//!
//! Каждый ресурс описывается типом-маркером, реализующим [`Resource`] и
//! подмножество трейтов возможностей. [`ResourceClient`] реализует каждую
//! операцию один раз, ограничивая её соответствующим трейтом: вызов
//! неподдерживаемой операции не скомпилируется.

use std::marker::PhantomData;

use reqwest::Method;
use serde::{Serialize, de::DeserializeOwned};

use crate::PortfolioClient;
use crate::error::PortfolioClientResult;
use crate::http_client::RequestBody;

/// REST-ресурс с путём коллекции и типом записи.
pub trait Resource {
    /// Путь коллекции относительно базового URL, без слэшей: `blogs`.
    const PATH: &'static str;
    /// Запись, которую возвращает сервер.
    type Record: DeserializeOwned;
}

/// `GET /<path>/`.
pub trait Listable: Resource {
    /// Операция доступна только с сохранённой сессией.
    const REQUIRES_SESSION: bool = false;
}

/// `GET /<path>/{id}/`.
pub trait Retrievable: Resource {}

/// `GET /<path>/featured/`.
pub trait Featurable: Resource {}

/// `POST /<path>/`.
pub trait Creatable: Resource {
    /// Тело создания. Способ кодирования (JSON или multipart) задаёт сам тип.
    type Payload: IntoRequestBody;
    /// Ответ сервера на создание.
    type Created: DeserializeOwned;
    /// Операция доступна только с сохранённой сессией.
    const REQUIRES_SESSION: bool = false;
}

/// `PATCH /<path>/{id}/`.
pub trait Updatable: Resource {
    /// Частичное обновление: сериализуются только заданные поля.
    type Patch: Serialize;
}

/// `DELETE /<path>/{id}/`.
pub trait Deletable: Resource {
    /// Операция доступна только с сохранённой сессией.
    const REQUIRES_SESSION: bool = false;
}

/// Преобразование нагрузки в тело запроса.
pub trait IntoRequestBody {
    /// Собирает тело запроса.
    fn into_request_body(self) -> PortfolioClientResult<RequestBody>;
}

fn collection_path<R: Resource>() -> String {
    format!("{}/", R::PATH)
}

fn item_path<R: Resource>(id: i64) -> String {
    format!("{}/{id}/", R::PATH)
}

fn featured_path<R: Resource>() -> String {
    format!("{}/featured/", R::PATH)
}

/// Клиент одного ресурса. Получается через [`PortfolioClient::resource`] или
/// именованные методы вроде [`PortfolioClient::blogs`].
pub struct ResourceClient<'a, R> {
    client: &'a PortfolioClient,
    _resource: PhantomData<fn() -> R>,
}

impl<'a, R: Resource> ResourceClient<'a, R> {
    pub(crate) fn new(client: &'a PortfolioClient) -> Self {
        Self {
            client,
            _resource: PhantomData,
        }
    }

    /// Путь коллекции ресурса.
    pub fn path(&self) -> &'static str {
        R::PATH
    }
}

impl<R: Listable> ResourceClient<'_, R> {
    /// Возвращает все записи коллекции в порядке, отданном сервером.
    pub async fn list(&self) -> PortfolioClientResult<Vec<R::Record>> {
        let token = self
            .client
            .session_token(R::PATH, "list", <R as Listable>::REQUIRES_SESSION)?;
        self.client
            .http
            .execute_json(Method::GET, &collection_path::<R>(), None, token.as_ref())
            .await
    }
}

impl<R: Retrievable> ResourceClient<'_, R> {
    /// Возвращает запись по идентификатору.
    pub async fn get(&self, id: i64) -> PortfolioClientResult<R::Record> {
        let token = self.client.session_token(R::PATH, "get", false)?;
        self.client
            .http
            .execute_json(Method::GET, &item_path::<R>(id), None, token.as_ref())
            .await
    }
}

impl<R: Featurable> ResourceClient<'_, R> {
    /// Возвращает записи, отмеченные для главной страницы.
    pub async fn featured(&self) -> PortfolioClientResult<Vec<R::Record>> {
        let token = self.client.session_token(R::PATH, "featured", false)?;
        self.client
            .http
            .execute_json(Method::GET, &featured_path::<R>(), None, token.as_ref())
            .await
    }
}

impl<R: Creatable> ResourceClient<'_, R> {
    /// Создаёт запись.
    pub async fn create(&self, payload: R::Payload) -> PortfolioClientResult<R::Created> {
        let token = self
            .client
            .session_token(R::PATH, "create", <R as Creatable>::REQUIRES_SESSION)?;
        let body = payload.into_request_body()?;
        self.client
            .http
            .execute_json(Method::POST, &collection_path::<R>(), Some(body), token.as_ref())
            .await
    }
}

impl<R: Updatable> ResourceClient<'_, R> {
    /// Частично обновляет запись.
    pub async fn update(&self, id: i64, patch: &R::Patch) -> PortfolioClientResult<R::Record> {
        let token = self.client.session_token(R::PATH, "update", false)?;
        let body = RequestBody::json(patch)?;
        self.client
            .http
            .execute_json(Method::PATCH, &item_path::<R>(id), Some(body), token.as_ref())
            .await
    }
}

impl<R: Deletable> ResourceClient<'_, R> {
    /// Удаляет запись. Тело ответа не читается.
    pub async fn delete(&self, id: i64) -> PortfolioClientResult<()> {
        let token = self
            .client
            .session_token(R::PATH, "delete", <R as Deletable>::REQUIRES_SESSION)?;
        self.client
            .http
            .execute(Method::DELETE, &item_path::<R>(id), None, token.as_ref())
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::{Blogs, Contacts};

    #[test]
    fn paths_follow_trailing_slash_convention() {
        assert_eq!(collection_path::<Blogs>(), "blogs/");
        assert_eq!(item_path::<Blogs>(5), "blogs/5/");
        assert_eq!(featured_path::<Blogs>(), "blogs/featured/");
    }

    #[test]
    fn admin_listing_is_marked() {
        assert!(<Contacts as Listable>::REQUIRES_SESSION);
        assert!(!<Blogs as Listable>::REQUIRES_SESSION);
    }
}
