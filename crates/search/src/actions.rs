//! Compiled-in navigable commands.
//!
//! Stable identifiers instead of closures: an action's navigation target is
//! data, so committed results stay serializable and the list is trivially
//! searchable.

use crate::item::{Category, NavigateTo, SearchItem};

/// Stable identifier for every command the palette can run.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ActionId {
    // Create
    NewQuotation,
    NewAccount,
    NewProduct,
    NewCompany,
    NewPriceList,

    // Navigate
    GoToDashboard,
    GoToAccounts,
    GoToProducts,
    GoToQuotations,
    GoToCompanies,
    GoToPriceLists,

    // Misc
    OpenSettings,
}

impl ActionId {
    /// Human-readable name for the command
    pub fn name(&self) -> &'static str {
        match self {
            Self::NewQuotation => "New Quotation",
            Self::NewAccount => "New Account",
            Self::NewProduct => "New Product",
            Self::NewCompany => "New Company",
            Self::NewPriceList => "New Price List",
            Self::GoToDashboard => "Go to Dashboard",
            Self::GoToAccounts => "Go to Accounts",
            Self::GoToProducts => "Go to Products",
            Self::GoToQuotations => "Go to Quotations",
            Self::GoToCompanies => "Go to Companies",
            Self::GoToPriceLists => "Go to Price Lists",
            Self::OpenSettings => "Settings",
        }
    }

    /// Search keywords (additional terms that match this command)
    pub fn keywords(&self) -> &'static str {
        match self {
            Self::NewQuotation => "create sales estimate voucher draft",
            Self::NewAccount => "create ledger party customer supplier",
            Self::NewProduct => "create item sku stock catalogue",
            Self::NewCompany => "create organisation firm branch",
            Self::NewPriceList => "create rates rate card pricing",
            Self::GoToDashboard => "home overview summary",
            Self::GoToAccounts => "ledgers parties browse list",
            Self::GoToProducts => "items inventory catalogue browse",
            Self::GoToQuotations => "estimates vouchers drafts browse",
            Self::GoToCompanies => "organisations firms branches browse",
            Self::GoToPriceLists => "rates rate cards pricing browse",
            Self::OpenSettings => "preferences configuration options",
        }
    }

    /// Short subtitle shown under the title
    pub fn description(&self) -> &'static str {
        match self {
            Self::NewQuotation => "Create a draft quotation",
            Self::NewAccount => "Create a ledger account",
            Self::NewProduct => "Create a product",
            Self::NewCompany => "Create a company",
            Self::NewPriceList => "Create a price list",
            Self::GoToDashboard => "Open the dashboard",
            Self::GoToAccounts => "Browse ledger accounts",
            Self::GoToProducts => "Browse products",
            Self::GoToQuotations => "Browse quotations",
            Self::GoToCompanies => "Browse companies",
            Self::GoToPriceLists => "Browse price lists",
            Self::OpenSettings => "Open application settings",
        }
    }

    /// Stable item id, unique across categories
    pub fn slug(&self) -> &'static str {
        match self {
            Self::NewQuotation => "action:new-quotation",
            Self::NewAccount => "action:new-account",
            Self::NewProduct => "action:new-product",
            Self::NewCompany => "action:new-company",
            Self::NewPriceList => "action:new-price-list",
            Self::GoToDashboard => "action:go-dashboard",
            Self::GoToAccounts => "action:go-accounts",
            Self::GoToProducts => "action:go-products",
            Self::GoToQuotations => "action:go-quotations",
            Self::GoToCompanies => "action:go-companies",
            Self::GoToPriceLists => "action:go-price-lists",
            Self::OpenSettings => "action:settings",
        }
    }

    /// Where committing this action sends the host
    pub fn navigate(&self) -> NavigateTo {
        match self {
            Self::NewQuotation => NavigateTo::action("quotations", "new"),
            Self::NewAccount => NavigateTo::action("accounts", "new"),
            Self::NewProduct => NavigateTo::action("products", "new"),
            Self::NewCompany => NavigateTo::action("companies", "new"),
            Self::NewPriceList => NavigateTo::action("price-lists", "new"),
            Self::GoToDashboard => NavigateTo::module("dashboard"),
            Self::GoToAccounts => NavigateTo::module("accounts"),
            Self::GoToProducts => NavigateTo::module("products"),
            Self::GoToQuotations => NavigateTo::module("quotations"),
            Self::GoToCompanies => NavigateTo::module("companies"),
            Self::GoToPriceLists => NavigateTo::module("price-lists"),
            Self::OpenSettings => NavigateTo::module("settings"),
        }
    }

    /// All available actions, in display order for the idle list
    pub fn all() -> &'static [ActionId] {
        &[
            Self::NewQuotation,
            Self::NewAccount,
            Self::NewProduct,
            Self::NewCompany,
            Self::NewPriceList,
            Self::GoToDashboard,
            Self::GoToAccounts,
            Self::GoToProducts,
            Self::GoToQuotations,
            Self::GoToCompanies,
            Self::GoToPriceLists,
            Self::OpenSettings,
        ]
    }

    /// Materialize as a result item
    pub fn item(&self) -> SearchItem {
        SearchItem::new(Category::Action, self.slug(), self.name(), self.navigate())
            .with_subtitle(self.description())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn slugs_are_unique() {
        let slugs: HashSet<&str> = ActionId::all().iter().map(|a| a.slug()).collect();
        assert_eq!(slugs.len(), ActionId::all().len());
    }

    #[test]
    fn create_actions_navigate_with_new_verb() {
        let nav = ActionId::NewQuotation.navigate();
        assert_eq!(nav.module, "quotations");
        assert_eq!(nav.action.as_deref(), Some("new"));
        assert!(nav.id.is_none());
    }

    #[test]
    fn goto_actions_navigate_to_module_root() {
        let nav = ActionId::GoToPriceLists.navigate();
        assert_eq!(nav.module, "price-lists");
        assert!(nav.action.is_none());
    }

    #[test]
    fn item_carries_slug_and_category() {
        let item = ActionId::OpenSettings.item();
        assert_eq!(item.id, "action:settings");
        assert_eq!(item.category, Category::Action);
        assert_eq!(item.title, "Settings");
    }
}
