use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::PortfolioClientResult;
use crate::storage::{FileStore, KeyValueStore, MemoryStore};

const TOKEN_KEY: &str = "admin_token";
const USER_KEY: &str = "admin_user";

#[derive(Clone, PartialEq, Eq)]
/// Непрозрачный токен сессии, выданный endpoint'ом авторизации.
pub struct SessionToken(String);

impl SessionToken {
    /// Оборачивает строку токена.
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Значение токена для заголовка `Authorization`.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("SessionToken(***)")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
/// Описание пользователя, сохраняемое рядом с токеном.
pub struct SessionUser {
    /// Логин, под которым выполнен вход.
    pub username: String,
}

#[derive(Clone)]
/// Контекст сессии, передаваемый клиенту при создании.
///
/// Хранит токен и описание пользователя под фиксированными ключами
/// `admin_token` и `admin_user`. Клоны разделяют одно хранилище.
pub struct SessionContext {
    store: Arc<dyn KeyValueStore>,
}

impl fmt::Debug for SessionContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionContext").finish_non_exhaustive()
    }
}

fn parse_token(raw: &str) -> Option<SessionToken> {
    let token = raw.trim();
    if token.is_empty() {
        return None;
    }
    Some(SessionToken::new(token))
}

fn parse_user(raw: &str) -> Option<SessionUser> {
    serde_json::from_str::<SessionUser>(raw).ok()
}

impl SessionContext {
    /// Создаёт контекст поверх произвольного хранилища.
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self { store }
    }

    /// Контекст в памяти процесса.
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryStore::new()))
    }

    /// Контекст поверх каталога на диске.
    pub fn in_dir(dir: impl Into<std::path::PathBuf>) -> Self {
        Self::new(Arc::new(FileStore::new(dir)))
    }

    /// Текущий токен. Пустое значение считается отсутствием токена.
    pub fn token(&self) -> PortfolioClientResult<Option<SessionToken>> {
        let raw = self.store.get_item(TOKEN_KEY)?;
        Ok(raw.as_deref().and_then(parse_token))
    }

    /// Сохранённый пользователь. Повреждённая запись игнорируется.
    pub fn user(&self) -> PortfolioClientResult<Option<SessionUser>> {
        let raw = self.store.get_item(USER_KEY)?;
        Ok(raw.as_deref().and_then(parse_user))
    }

    /// Признак сохранённой сессии.
    pub fn is_authenticated(&self) -> PortfolioClientResult<bool> {
        Ok(self.token()?.is_some())
    }

    /// Сохраняет токен и пользователя после успешного входа.
    ///
    /// Токен пишется последним: при ошибке записи новый токен в хранилище
    /// не остаётся.
    pub fn persist(&self, token: &SessionToken, user: &SessionUser) -> PortfolioClientResult<()> {
        let raw_user = serde_json::to_string(user).map_err(|err| {
            crate::error::PortfolioClientError::InvalidRequest(format!(
                "failed to serialize session user: {err}"
            ))
        })?;
        self.store.set_item(USER_KEY, &raw_user)?;
        if let Err(err) = self.store.set_item(TOKEN_KEY, token.as_str()) {
            self.store.remove_item(USER_KEY).ok();
            return Err(err.into());
        }
        Ok(())
    }

    /// Удаляет токен и пользователя.
    pub fn clear(&self) -> PortfolioClientResult<()> {
        self.store.remove_item(TOKEN_KEY)?;
        self.store.remove_item(USER_KEY)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_token_trims_and_returns_value() {
        let token = parse_token("  abc123  ");
        assert_eq!(token.as_ref().map(SessionToken::as_str), Some("abc123"));
    }

    #[test]
    fn parse_token_rejects_blank() {
        assert!(parse_token("   ").is_none());
    }

    #[test]
    fn parse_user_returns_none_for_invalid_json() {
        assert!(parse_user("{not-json}").is_none());
    }

    #[test]
    fn persist_then_clear_round_trip() {
        let session = SessionContext::in_memory();
        assert!(!session.is_authenticated().expect("read"));

        let user = SessionUser {
            username: "admin".to_string(),
        };
        session
            .persist(&SessionToken::new("tok"), &user)
            .expect("persist");

        assert_eq!(
            session.token().expect("read").map(|t| t.as_str().to_string()),
            Some("tok".to_string())
        );
        assert_eq!(session.user().expect("read"), Some(user));

        session.clear().expect("clear");
        assert!(session.token().expect("read").is_none());
        assert!(session.user().expect("read").is_none());
    }

    #[test]
    fn clones_share_the_store() {
        let session = SessionContext::in_memory();
        let other = session.clone();
        session
            .persist(
                &SessionToken::new("shared"),
                &SessionUser {
                    username: "u".to_string(),
                },
            )
            .expect("persist");
        assert!(other.is_authenticated().expect("read"));
    }

    /// Хранилище, отказывающее в записи одного ключа.
    struct RefusingStore {
        inner: MemoryStore,
        refused_key: &'static str,
    }

    impl KeyValueStore for RefusingStore {
        fn get_item(&self, key: &str) -> std::io::Result<Option<String>> {
            self.inner.get_item(key)
        }

        fn set_item(&self, key: &str, value: &str) -> std::io::Result<()> {
            if key == self.refused_key {
                return Err(std::io::Error::other("disk full"));
            }
            self.inner.set_item(key, value)
        }

        fn remove_item(&self, key: &str) -> std::io::Result<()> {
            self.inner.remove_item(key)
        }
    }

    fn refusing(refused_key: &'static str) -> SessionContext {
        SessionContext::new(Arc::new(RefusingStore {
            inner: MemoryStore::new(),
            refused_key,
        }))
    }

    fn admin() -> SessionUser {
        SessionUser {
            username: "admin".to_string(),
        }
    }

    #[test]
    fn failed_user_write_leaves_no_token() {
        let session = refusing(USER_KEY);
        let result = session.persist(&SessionToken::new("abc"), &admin());

        assert!(matches!(
            result,
            Err(crate::error::PortfolioClientError::Storage(_))
        ));
        assert!(session.token().expect("read").is_none());
    }

    #[test]
    fn failed_token_write_rolls_back_user() {
        let session = refusing(TOKEN_KEY);
        let result = session.persist(&SessionToken::new("abc"), &admin());

        assert!(result.is_err());
        assert!(session.token().expect("read").is_none());
        assert!(session.user().expect("read").is_none());
    }

    #[test]
    fn token_debug_is_redacted() {
        let token = SessionToken::new("secret");
        assert_eq!(format!("{token:?}"), "SessionToken(***)");
    }
}
