use std::collections::HashMap;
use std::sync::Arc;

use log::debug;
use tokio::sync::RwLock;
use tokio::task;
use tokio::time::{sleep, Duration};

use amicale_agenda::Agenda;

/// TTL cache of built agendas, keyed by window length in months. Each
/// insert spawns its own expiry task.
pub struct AgendaCache {
    enabled: bool,
    ttl: Duration,
    inner: RwLock<HashMap<u32, Arc<Agenda>>>,
}

impl AgendaCache {
    pub fn new(enabled: bool, ttl: Duration) -> Arc<Self> {
        Arc::new(Self {
            enabled,
            ttl,
            inner: RwLock::new(HashMap::new()),
        })
    }

    pub async fn insert(self: Arc<Self>, months: u32, agenda: Agenda) -> Arc<Agenda> {
        let agenda = Arc::new(agenda);
        if !self.enabled {
            return agenda;
        }

        self.inner
            .write()
            .await
            .insert(months, Arc::clone(&agenda));

        let cache = Arc::clone(&self);
        task::spawn(async move {
            sleep(cache.ttl).await;
            cache.inner.write().await.remove(&months);
            debug!("expired cached agenda for a {months} month window");
        });

        agenda
    }

    pub async fn get(&self, months: u32) -> Option<Arc<Agenda>> {
        if !self.enabled {
            return None;
        }

        let hit = self.inner.read().await.get(&months).map(Arc::clone);
        if hit.is_some() {
            debug!("serving cached agenda for a {months} month window");
        }

        hit
    }
}
