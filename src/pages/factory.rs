//! Lazy page-object factory
//!
//! One factory per session. Each page object is built on first request and
//! shared on every later one, so workflow state (picked dates, confirmed
//! edit mode) survives across orchestration steps that re-request the page.

use crate::config::Config;
use crate::memo::RunMemo;
use crate::pages::{
    AllCampaignsPage, AllEventsPage, AllTemplatesPage, ContactListsPage, CreateCampaignPage,
    CreateEventPage, CreateTemplatePage, EditEventPage, LoginPage, RegisterPage,
};
use crate::session::Session;
use once_cell::sync::OnceCell;
use std::sync::Arc;

#[derive(Debug)]
pub struct PageFactory {
    session: Session,
    config: Arc<Config>,
    memo: RunMemo,
    login: OnceCell<Arc<LoginPage>>,
    register: OnceCell<Arc<RegisterPage>>,
    all_events: OnceCell<Arc<AllEventsPage>>,
    create_event: OnceCell<Arc<CreateEventPage>>,
    edit_event: OnceCell<Arc<EditEventPage>>,
    contact_lists: OnceCell<Arc<ContactListsPage>>,
    all_campaigns: OnceCell<Arc<AllCampaignsPage>>,
    create_campaign: OnceCell<Arc<CreateCampaignPage>>,
    all_templates: OnceCell<Arc<AllTemplatesPage>>,
    create_template: OnceCell<Arc<CreateTemplatePage>>,
}

impl PageFactory {
    pub fn new(session: Session, config: Arc<Config>) -> Self {
        Self {
            session,
            config,
            memo: RunMemo::default(),
            login: OnceCell::new(),
            register: OnceCell::new(),
            all_events: OnceCell::new(),
            create_event: OnceCell::new(),
            edit_event: OnceCell::new(),
            contact_lists: OnceCell::new(),
            all_campaigns: OnceCell::new(),
            create_campaign: OnceCell::new(),
            all_templates: OnceCell::new(),
            create_template: OnceCell::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn config(&self) -> &Arc<Config> {
        &self.config
    }

    /// Cross-page scratchpad for values produced in one workflow and
    /// consumed in another
    pub fn memo(&self) -> &RunMemo {
        &self.memo
    }

    pub fn login(&self) -> Arc<LoginPage> {
        self.login
            .get_or_init(|| Arc::new(LoginPage::new(self.session.clone(), self.config.clone())))
            .clone()
    }

    pub fn register(&self) -> Arc<RegisterPage> {
        self.register
            .get_or_init(|| Arc::new(RegisterPage::new(self.session.clone(), self.config.clone())))
            .clone()
    }

    pub fn all_events(&self) -> Arc<AllEventsPage> {
        self.all_events
            .get_or_init(|| Arc::new(AllEventsPage::new(self.session.clone(), self.config.clone())))
            .clone()
    }

    pub fn create_event(&self) -> Arc<CreateEventPage> {
        self.create_event
            .get_or_init(|| {
                Arc::new(CreateEventPage::new(self.session.clone(), self.config.clone()))
            })
            .clone()
    }

    pub fn edit_event(&self) -> Arc<EditEventPage> {
        self.edit_event
            .get_or_init(|| Arc::new(EditEventPage::new(self.session.clone(), self.config.clone())))
            .clone()
    }

    pub fn contact_lists(&self) -> Arc<ContactListsPage> {
        self.contact_lists
            .get_or_init(|| {
                Arc::new(ContactListsPage::new(self.session.clone(), self.config.clone()))
            })
            .clone()
    }

    pub fn all_campaigns(&self) -> Arc<AllCampaignsPage> {
        self.all_campaigns
            .get_or_init(|| {
                Arc::new(AllCampaignsPage::new(self.session.clone(), self.config.clone()))
            })
            .clone()
    }

    pub fn create_campaign(&self) -> Arc<CreateCampaignPage> {
        self.create_campaign
            .get_or_init(|| {
                Arc::new(CreateCampaignPage::new(self.session.clone(), self.config.clone()))
            })
            .clone()
    }

    pub fn all_templates(&self) -> Arc<AllTemplatesPage> {
        self.all_templates
            .get_or_init(|| {
                Arc::new(AllTemplatesPage::new(self.session.clone(), self.config.clone()))
            })
            .clone()
    }

    pub fn create_template(&self) -> Arc<CreateTemplatePage> {
        self.create_template
            .get_or_init(|| {
                Arc::new(CreateTemplatePage::new(self.session.clone(), self.config.clone()))
            })
            .clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::mock::MockPage;

    #[tokio::test]
    async fn test_factory_reuses_page_instances() {
        let page = MockPage::new("https://app.test/login");
        let factory = PageFactory::new(Session::new(page), Arc::new(Config::default()));

        let first = factory.create_event();
        let second = factory.create_event();
        assert!(Arc::ptr_eq(&first, &second));

        let login_a = factory.login();
        let login_b = factory.login();
        assert!(Arc::ptr_eq(&login_a, &login_b));
    }

    #[tokio::test]
    async fn test_memo_shared_across_pages() {
        let page = MockPage::new("https://app.test");
        let factory = PageFactory::new(Session::new(page), Arc::new(Config::default()));

        factory.memo().set_latest_event_name("Launch Recap").await;
        assert_eq!(
            factory.memo().latest_event_name().await,
            Some("Launch Recap".to_string())
        );
    }
}
