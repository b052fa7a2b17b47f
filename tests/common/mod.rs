#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::Router;
use axum_test::TestServer;

use catalogue_api::{
    db::InMemoryInteractionStore,
    models::{ContentId, InteractionNotice, RecommendationParams},
    routes::{create_router, AppState},
    services::{EngineError, RecommendationEngine},
};

/// Scripted stand-in for the recommendation engine
#[derive(Default)]
pub struct StubEngine {
    pub notices: Mutex<Vec<InteractionNotice>>,
    pub fetches: Mutex<Vec<RecommendationParams>>,
    ranking: Vec<ContentId>,
    fetch_failure: Option<(u16, String)>,
    notify_fails: bool,
}

impl StubEngine {
    pub fn ranking(ids: Vec<ContentId>) -> Self {
        Self {
            ranking: ids,
            ..Self::default()
        }
    }

    pub fn failing_fetch(status: u16, body: &str) -> Self {
        Self {
            fetch_failure: Some((status, body.to_string())),
            ..Self::default()
        }
    }

    pub fn failing_notify() -> Self {
        Self {
            notify_fails: true,
            ..Self::default()
        }
    }

    /// Waits until the detached notify task has delivered `expected` notices
    pub async fn wait_for_notices(&self, expected: usize) -> Vec<InteractionNotice> {
        for _ in 0..100 {
            {
                let notices = self.notices.lock().unwrap();
                if notices.len() >= expected {
                    return notices.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("expected {} notices", expected);
    }
}

#[async_trait::async_trait]
impl RecommendationEngine for StubEngine {
    async fn fetch(&self, params: RecommendationParams) -> Result<Vec<ContentId>, EngineError> {
        self.fetches.lock().unwrap().push(params);
        match &self.fetch_failure {
            Some((status, body)) => Err(EngineError::Status {
                status: *status,
                body: body.clone(),
            }),
            None => Ok(self.ranking.clone()),
        }
    }

    async fn notify(&self, notice: InteractionNotice) -> Result<(), EngineError> {
        self.notices.lock().unwrap().push(notice);
        if self.notify_fails {
            Err(EngineError::Status {
                status: 500,
                body: "engine unavailable".to_string(),
            })
        } else {
            Ok(())
        }
    }
}

pub struct TestApp {
    pub server: TestServer,
    pub store: Arc<InMemoryInteractionStore>,
    pub engine: Arc<StubEngine>,
}

pub fn create_test_app(engine: StubEngine) -> TestApp {
    let store = Arc::new(InMemoryInteractionStore::new());
    let engine = Arc::new(engine);
    let state = AppState::new(store.clone(), engine.clone());
    let server = TestServer::new(create_router(state)).unwrap();

    TestApp {
        server,
        store,
        engine,
    }
}

/// Serves `router` on an ephemeral local port and returns its base URL
pub async fn spawn_http(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}
