use std::time::{SystemTime, UNIX_EPOCH};

use portfolio_client::{
    BlogPostPatch, ClientConfig, NewBlogPost, PortfolioClient, PortfolioClientError,
    SessionContext,
};

fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock must be after unix epoch")
        .as_nanos();
    format!("{nanos}")
}

#[tokio::test]
#[ignore = "requires running content API and admin credentials"]
async fn live_blog_flow() {
    let base_url = std::env::var("PORTFOLIO_API_URL")
        .unwrap_or_else(|_| "http://127.0.0.1:8000/api".to_string());
    let username = std::env::var("PORTFOLIO_ADMIN_USER").expect("PORTFOLIO_ADMIN_USER must be set");
    let password =
        std::env::var("PORTFOLIO_ADMIN_PASSWORD").expect("PORTFOLIO_ADMIN_PASSWORD must be set");

    let session = SessionContext::in_memory();
    let client = PortfolioClient::new(ClientConfig::new(base_url), session.clone())
        .expect("client must build");

    client
        .login(&username, &password)
        .await
        .expect("login must succeed");
    assert!(session.is_authenticated().expect("session readable"));

    let title = format!("smoke {}", unique_suffix());
    let created = client
        .blogs()
        .create(NewBlogPost {
            title: title.clone(),
            excerpt: "smoke excerpt".to_string(),
            content: "smoke content".to_string(),
            category: "smoke".to_string(),
            read_time: None,
            image: None,
            is_featured: false,
        })
        .await
        .expect("create must succeed");
    assert_eq!(created.title, title);

    let fetched = client
        .blogs()
        .get(created.id)
        .await
        .expect("get must succeed");
    assert_eq!(fetched.id, created.id);

    let listed = client.blogs().list().await.expect("list must succeed");
    assert!(listed.iter().any(|blog| blog.id == created.id));

    let updated = client
        .blogs()
        .update(
            created.id,
            &BlogPostPatch {
                title: Some(format!("{title} updated")),
                ..Default::default()
            },
        )
        .await
        .expect("update must succeed");
    assert_eq!(updated.excerpt, "smoke excerpt");

    client
        .blogs()
        .delete(created.id)
        .await
        .expect("delete must succeed");

    let after_delete = client.blogs().get(created.id).await;
    assert!(matches!(after_delete, Err(PortfolioClientError::NotFound)));

    client.logout().expect("logout must succeed");
    assert!(!session.is_authenticated().expect("session readable"));
}
