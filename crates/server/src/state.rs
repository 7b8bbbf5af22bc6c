use std::sync::Arc;

use chrono::NaiveDate;
use db::DBService;
use services::services::{
    daily_content::DailyContentService, dream_dictionary::DreamDictionary,
    interpretations::InterpretationService,
};

use crate::config::Config;

/// Shared handler state; cheap to clone
#[derive(Clone)]
pub struct AppState {
    db: DBService,
    config: Arc<Config>,
    interpretations: InterpretationService,
    dreams: DreamDictionary,
    daily: DailyContentService,
}

impl AppState {
    pub fn new(db: DBService, config: Config) -> Self {
        let interpretations = InterpretationService::new(db.pool.clone(), config.cache_ttl());
        let dreams = DreamDictionary::new(db.pool.clone());
        let daily = DailyContentService::new(db.pool.clone(), interpretations.clone());

        Self {
            db,
            config: Arc::new(config),
            interpretations,
            dreams,
            daily,
        }
    }

    pub fn db(&self) -> &DBService {
        &self.db
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn interpretations(&self) -> &InterpretationService {
        &self.interpretations
    }

    pub fn dreams(&self) -> &DreamDictionary {
        &self.dreams
    }

    pub fn daily(&self) -> &DailyContentService {
        &self.daily
    }

    pub fn today(&self) -> NaiveDate {
        self.config.today()
    }

    /// `date` if given, otherwise today
    pub fn date_or_today(&self, date: Option<NaiveDate>) -> NaiveDate {
        date.unwrap_or_else(|| self.today())
    }
}
