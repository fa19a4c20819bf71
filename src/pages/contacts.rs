//! Contact list screens: creation, CSV import, and navigation

use crate::config::Config;
use crate::locator::{LocatorChain, LocatorStrategy};
use crate::pages::UiDriver;
use crate::session::Session;
use crate::Result;
use std::path::Path;
use std::sync::Arc;
use tracing::{info, instrument};

#[derive(Debug)]
pub struct ContactListsPage {
    ui: UiDriver,
    nav_link: LocatorChain,
    new_list_button: LocatorChain,
    list_name_input: LocatorChain,
    tag_name_input: LocatorChain,
    add_tag_button: LocatorChain,
    create_list_button: LocatorChain,
    import_button: LocatorChain,
    choose_file_input: LocatorChain,
    import_contacts_button: LocatorChain,
    back_button: LocatorChain,
}

impl ContactListsPage {
    pub fn new(session: Session, config: Arc<Config>) -> Self {
        Self {
            ui: UiDriver::new(session, config),
            nav_link: LocatorChain::new(
                "contact lists nav link",
                LocatorStrategy::role("link", "Contact Lists"),
            ),
            new_list_button: LocatorChain::new(
                "new contact list button",
                LocatorStrategy::role("button", "New Contact List"),
            ),
            list_name_input: LocatorChain::new(
                "list name input",
                LocatorStrategy::placeholder("Enter list name"),
            ),
            tag_name_input: LocatorChain::new(
                "tag name input",
                LocatorStrategy::placeholder("Enter tag name"),
            ),
            add_tag_button: LocatorChain::new(
                "add tag button",
                LocatorStrategy::role("button", "Add Tag"),
            ),
            create_list_button: LocatorChain::new(
                "create list button",
                LocatorStrategy::role("button", "Create List"),
            ),
            import_button: LocatorChain::new(
                "import button",
                LocatorStrategy::role("button", "Import"),
            ),
            choose_file_input: LocatorChain::new(
                "csv file input",
                LocatorStrategy::label("Choose File"),
            )
            .or(LocatorStrategy::css("input[type=\"file\"]")),
            import_contacts_button: LocatorChain::new(
                "import contacts button",
                LocatorStrategy::role("button", "Import Contacts"),
            ),
            back_button: LocatorChain::new(
                "back to lists button",
                LocatorStrategy::role("button", "Back to Contact-Lists"),
            ),
        }
    }

    /// Navigate to the contact lists overview through the sidebar;
    /// works from any page that renders the main navigation
    pub async fn goto_from_any_page(&self) -> Result<()> {
        self.ui.click(&self.nav_link).await
    }

    /// Open the creation dialog
    pub async fn open_create_form(&self) -> Result<()> {
        self.ui.click(&self.new_list_button).await
    }

    /// Fill the creation dialog and submit it.
    #[instrument(skip(self))]
    pub async fn create_list(&self, name: &str, tags: &[&str]) -> Result<()> {
        self.ui.fill(&self.list_name_input, name).await?;
        for tag in tags {
            self.ui.fill(&self.tag_name_input, tag).await?;
            self.ui.click(&self.add_tag_button).await?;
        }
        self.ui.click(&self.create_list_button).await?;
        info!(name, tags = tags.len(), "contact list created");
        Ok(())
    }

    /// Await the list detail view by its heading
    pub async fn wait_for_list_detail(&self, name: &str) -> Result<()> {
        let ui = self.ui.clone();
        let heading = LocatorStrategy::role("heading", name);
        self.ui
            .poller()
            .require(self.ui.gate_policy(), "contact list detail view", move || {
                let ui = ui.clone();
                let heading = heading.clone();
                async move { ui.any_visible(&heading).await }
            })
            .await
    }

    /// Open the import dialog on the current list detail view
    pub async fn open_import_dialog(&self) -> Result<()> {
        self.ui.click(&self.import_button).await
    }

    /// Import a CSV of contacts into the currently open list. The file's
    /// content is opaque here; the app validates it server-side.
    #[instrument(skip(self))]
    pub async fn import_from_csv(&self, path: &Path) -> Result<()> {
        self.open_import_dialog().await?;

        let input = self
            .ui
            .resolver()
            .resolve(&self.choose_file_input, self.ui.strategy_timeout())
            .await?;
        input.set_input_files(&[path]).await?;

        self.ui.click(&self.import_contacts_button).await?;
        info!(path = %path.display(), "contact import submitted");
        Ok(())
    }

    /// Return to the lists overview from a detail view
    pub async fn back_to_lists(&self) -> Result<()> {
        self.ui.click(&self.back_button).await
    }

    /// Open one list's detail view by name
    pub async fn open_list_by_name(&self, name: &str) -> Result<()> {
        let chain = LocatorChain::new(
            "contact list entry",
            LocatorStrategy::role("link", name),
        )
        .or(LocatorStrategy::role("heading", name))
        .or(LocatorStrategy::text(name));
        self.ui.click(&chain).await
    }
}
