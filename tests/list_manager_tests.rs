/// List manager tests against the in-process API
///
/// Run with: cargo test --test list_manager_tests
use async_trait::async_trait;
use profweb::client::Session;
use profweb::model::{CommentDraft, CommentStatus, ProjectDraft, ProjectStatus};
use profweb::{
    AppState, ClientError, Comment, EntityId, ListManager, NewsArticle, NoticeLevel, Project,
    ReconcilePolicy, Resource, ResourceApi, RouterApi, Stores, build_router,
};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

fn router_with(stores: &Stores) -> axum::Router {
    build_router(AppState::new(stores.clone()))
}

async fn seed_projects(stores: &Stores, titles: &[&str]) {
    for title in titles {
        stores
            .projects
            .create((), ProjectDraft::titled(*title))
            .await
            .expect("seed project");
    }
}

/// Wraps another API and fails every call while `down` is set.
struct Flaky<A> {
    inner: A,
    down: Arc<AtomicBool>,
}

impl<A> Flaky<A> {
    fn new(inner: A) -> (Self, Arc<AtomicBool>) {
        let down = Arc::new(AtomicBool::new(false));
        (
            Self {
                inner,
                down: down.clone(),
            },
            down,
        )
    }

    fn check(&self) -> Result<(), ClientError> {
        if self.down.load(Ordering::SeqCst) {
            return Err(ClientError::Transport("connection refused".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl<R: Resource, A: ResourceApi<R>> ResourceApi<R> for Flaky<A> {
    async fn list(&self) -> Result<Vec<R>, ClientError> {
        self.check()?;
        self.inner.list().await
    }

    async fn create(&self, draft: &R::Draft) -> Result<R, ClientError> {
        self.check()?;
        self.inner.create(draft).await
    }

    async fn update(&self, entity: &R) -> Result<R, ClientError> {
        self.check()?;
        self.inner.update(entity).await
    }

    async fn delete(&self, id: EntityId) -> Result<(), ClientError> {
        self.check()?;
        self.inner.delete(id).await
    }
}

#[tokio::test]
async fn load_replaces_cache_with_server_list() {
    let stores = Stores::in_memory();
    seed_projects(&stores, &["Alpha", "Beta"]).await;

    let mut manager = ListManager::<Project, _>::new(RouterApi::new(router_with(&stores), ()));
    manager.load().await.expect("load should succeed");

    let titles: Vec<_> = manager.items().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Beta", "Alpha"]);
    assert!(manager.take_notices().is_empty());
}

#[tokio::test]
async fn failed_load_keeps_cache_and_notifies() {
    let stores = Stores::in_memory();
    seed_projects(&stores, &["Alpha"]).await;
    let (api, down) = Flaky::new(RouterApi::<Project>::new(router_with(&stores), ()));

    let mut manager = ListManager::<Project, _>::new(api);
    down.store(true, Ordering::SeqCst);
    assert!(manager.load().await.is_err());
    assert!(manager.items().is_empty());

    let notices = manager.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Failed to load projects");

    down.store(false, Ordering::SeqCst);
    manager.load().await.expect("second load should succeed");
    assert_eq!(manager.items().len(), 1);

    down.store(true, Ordering::SeqCst);
    assert!(manager.load().await.is_err());
    assert_eq!(manager.items().len(), 1);
}

#[tokio::test]
async fn search_is_a_case_insensitive_projection() {
    let stores = Stores::in_memory();
    seed_projects(&stores, &["Tumor imaging", "Gene editing", "MRI atlas"]).await;

    let mut manager = ListManager::<Project, _>::new(RouterApi::new(router_with(&stores), ()));
    manager.load().await.unwrap();

    manager.set_query("IMAGING");
    let visible: Vec<_> = manager.visible().iter().map(|p| p.title.clone()).collect();
    assert_eq!(visible, ["Tumor imaging"]);
    assert_eq!(manager.items().len(), 3);

    manager.set_query("");
    assert_eq!(manager.visible().len(), 3);

    manager.set_query("nothing like this");
    assert!(manager.visible().is_empty());
}

#[tokio::test]
async fn confirmed_add_prepends_server_entity() {
    let stores = Stores::in_memory();
    seed_projects(&stores, &["Existing"]).await;

    let mut manager = ListManager::<Project, _>::new(RouterApi::new(router_with(&stores), ()));
    manager.load().await.unwrap();

    manager.begin_add();
    manager.draft_mut().expect("add session open").title = "Fresh".to_string();
    let created = manager.confirm_add().await.expect("add should succeed");

    assert_eq!(manager.items()[0], created);
    assert_eq!(manager.items().len(), 2);
    assert!(manager.session().is_none());

    let notices = manager.take_notices();
    assert_eq!(notices[0].level, NoticeLevel::Success);
    assert_eq!(notices[0].message, "Project added successfully");
}

#[tokio::test]
async fn rejected_add_keeps_draft_and_cache() {
    let stores = Stores::in_memory();
    let mut manager = ListManager::<Project, _>::new(RouterApi::new(router_with(&stores), ()));
    manager.load().await.unwrap();

    manager.begin_add();
    manager.draft_mut().unwrap().description = "no title yet".to_string();

    let err = manager.confirm_add().await.unwrap_err();
    assert_eq!(err.api_code(), Some("invalid_body"));
    assert!(manager.items().is_empty());
    assert_eq!(manager.take_notices()[0].message, "Failed to add project");

    manager.begin_add();
    let draft = manager.draft_mut().expect("draft survives the failure");
    assert_eq!(draft.description, "no title yet");
    draft.title = "Now titled".to_string();
    manager.confirm_add().await.expect("retry should succeed");
    assert_eq!(manager.items().len(), 1);
}

#[tokio::test]
async fn cancel_discards_the_draft() {
    let stores = Stores::in_memory();
    let mut manager = ListManager::<Project, _>::new(RouterApi::new(router_with(&stores), ()));

    manager.begin_add();
    manager.draft_mut().unwrap().title = "Scratch".to_string();
    manager.cancel();
    assert!(manager.session().is_none());

    manager.begin_add();
    assert_eq!(manager.draft_mut().unwrap().title, "");
    assert!(matches!(
        manager.confirm_edit().await,
        Err(ClientError::NoSession("edit"))
    ));
}

#[tokio::test]
async fn confirmed_edit_replaces_by_identifier() {
    let stores = Stores::in_memory();
    seed_projects(&stores, &["Alpha", "Beta"]).await;

    let mut manager = ListManager::<Project, _>::new(RouterApi::new(router_with(&stores), ()));
    manager.load().await.unwrap();
    let target = manager.items()[1].id;

    manager.begin_edit(target).unwrap();
    manager.editing_mut().unwrap().status = ProjectStatus::Completed;
    let updated = manager.confirm_edit().await.unwrap();

    assert_eq!(updated.status, ProjectStatus::Completed);
    assert_eq!(manager.items()[1], updated);
    assert_eq!(manager.items()[0].status, ProjectStatus::Ongoing);
    assert_eq!(
        manager.take_notices()[0].message,
        "Project updated successfully"
    );
}

#[tokio::test]
async fn editing_unknown_identifier_is_refused() {
    let stores = Stores::in_memory();
    let mut manager = ListManager::<Project, _>::new(RouterApi::new(router_with(&stores), ()));
    let err = manager.begin_edit(EntityId::new(5).unwrap()).unwrap_err();
    assert!(matches!(err, ClientError::NotLoaded { .. }));
}

#[tokio::test]
async fn failed_delete_leaves_cache_unchanged() {
    let stores = Stores::in_memory();
    seed_projects(&stores, &["Alpha", "Beta"]).await;
    let (api, down) = Flaky::new(RouterApi::<Project>::new(router_with(&stores), ()));

    let mut manager = ListManager::<Project, _>::new(api);
    manager.load().await.unwrap();
    let before = manager.items().to_vec();

    down.store(true, Ordering::SeqCst);
    assert!(manager.delete(before[0].id).await.is_err());
    assert_eq!(manager.items(), before.as_slice());
    assert_eq!(manager.take_notices()[0].message, "Failed to delete project");

    down.store(false, Ordering::SeqCst);
    manager.delete(before[0].id).await.unwrap();
    assert_eq!(manager.items(), &before[1..]);

    let err = manager.delete(before[0].id).await.unwrap_err();
    assert_eq!(err.api_code(), Some("not_found"));
    assert_eq!(manager.items(), &before[1..]);
}

#[tokio::test]
async fn delete_closes_edit_session_on_same_entity() {
    let stores = Stores::in_memory();
    seed_projects(&stores, &["Alpha"]).await;

    let mut manager = ListManager::<Project, _>::new(RouterApi::new(router_with(&stores), ()));
    manager.load().await.unwrap();
    let id = manager.items()[0].id;

    manager.begin_edit(id).unwrap();
    manager.delete(id).await.unwrap();
    assert!(manager.session().is_none());
    assert!(manager.items().is_empty());
}

#[tokio::test]
async fn refetch_policy_picks_up_foreign_writes() {
    let stores = Stores::in_memory();
    seed_projects(&stores, &["Alpha"]).await;

    let mut manager = ListManager::<Project, _>::new(RouterApi::new(router_with(&stores), ()))
        .with_policy(ReconcilePolicy::Refetch);
    manager.load().await.unwrap();

    // Written behind the manager's back.
    seed_projects(&stores, &["Concurrent"]).await;

    manager.begin_add();
    manager.draft_mut().unwrap().title = "Mine".to_string();
    manager.confirm_add().await.unwrap();

    let titles: Vec<_> = manager.items().iter().map(|p| p.title.as_str()).collect();
    assert_eq!(titles, ["Mine", "Concurrent", "Alpha"]);
}

#[tokio::test]
async fn news_manager_uses_article_label() {
    let stores = Stores::in_memory();
    let mut manager =
        ListManager::<NewsArticle, _>::new(RouterApi::new(router_with(&stores), ()));

    manager.begin_add();
    manager.draft_mut().unwrap().title = "Grant awarded".to_string();
    manager.confirm_add().await.unwrap();

    assert_eq!(
        manager.take_notices()[0].message,
        "News article added successfully"
    );
}

#[tokio::test]
async fn comment_moderation_round_trip() {
    let stores = Stores::in_memory();
    let article = stores
        .news
        .create((), Default::default())
        .await
        .expect("seed article");
    let news_id = article.entity.id;

    stores
        .comments
        .create(
            news_id,
            CommentDraft {
                author_name: "Jane Smith".to_string(),
                author_email: "jane@example.com".to_string(),
                content: "When is the next seminar?".to_string(),
            },
        )
        .await
        .expect("seed comment");

    let mut manager =
        ListManager::<Comment, _>::new(RouterApi::new(router_with(&stores), news_id));
    manager.load().await.unwrap();
    let id = manager.items()[0].id;
    assert_eq!(manager.items()[0].status, CommentStatus::Pending);

    let approved = manager.set_status(id, CommentStatus::Approved).await.unwrap();
    assert_eq!(approved.status, CommentStatus::Approved);
    assert_eq!(manager.items()[0].status, CommentStatus::Approved);
    assert!(!matches!(manager.session(), Some(Session::Editing(_))));

    manager.delete(id).await.unwrap();
    assert!(manager.items().is_empty());

    let reloaded = stores.comments.list(&news_id).await.unwrap();
    assert!(reloaded.is_empty());
}

#[tokio::test]
async fn failed_edit_keeps_session_and_cache() {
    let stores = Stores::in_memory();
    seed_projects(&stores, &["Alpha", "Beta"]).await;
    let (api, down) = Flaky::new(RouterApi::<Project>::new(router_with(&stores), ()));

    let mut manager = ListManager::<Project, _>::new(api);
    manager.load().await.unwrap();
    let before = manager.items().to_vec();
    let target = before[0].id;

    manager.begin_edit(target).unwrap();
    manager.editing_mut().unwrap().title = "Renamed".to_string();

    down.store(true, Ordering::SeqCst);
    assert!(manager.confirm_edit().await.is_err());

    match manager.session() {
        Some(Session::Editing(project)) => {
            assert_eq!(project.id, target);
            assert_eq!(project.title, "Renamed");
        }
        other => panic!("edit session should stay open, got {other:?}"),
    }
    assert_eq!(manager.items(), before.as_slice());

    let notices = manager.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Failed to update project");

    down.store(false, Ordering::SeqCst);
    let updated = manager.confirm_edit().await.expect("retry should succeed");
    assert_eq!(manager.items()[0], updated);
    assert!(manager.session().is_none());
}

#[tokio::test]
async fn moderating_uncached_comment_raises_notice() {
    let stores = Stores::in_memory();
    let article = stores
        .news
        .create((), Default::default())
        .await
        .expect("seed article");

    let mut manager =
        ListManager::<Comment, _>::new(RouterApi::new(router_with(&stores), article.entity.id));
    manager.load().await.unwrap();

    let err = manager
        .set_status(EntityId::new(9).unwrap(), CommentStatus::Rejected)
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::NotLoaded { .. }));

    let notices = manager.take_notices();
    assert_eq!(notices.len(), 1);
    assert_eq!(notices[0].level, NoticeLevel::Error);
    assert_eq!(notices[0].message, "Failed to update comment");
}
