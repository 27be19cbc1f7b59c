//! Catalog query engine.
//!
//! One parameterized engine serves both the public catalog and the employee
//! catalog; [`CatalogView`] is the capability flag that separates them
//! (default page size, `stock` ordering, `active` filtering). The engine is
//! pure: it takes an owned snapshot, never fails, and holds no state.

use stockroom_core::CategoryId;

use crate::product::Product;

/// Default page size for the public catalog.
pub const PUBLIC_PAGE_SIZE: u32 = 12;
/// Default page size for the employee catalog.
pub const EMPLOYEE_PAGE_SIZE: u32 = 20;

/// Which catalog a query runs against.
///
/// The snapshot is expected to be scoped accordingly by the store: the public
/// catalog receives active products only, the employee catalog receives all.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum CatalogView {
    Public,
    Employee,
}

impl CatalogView {
    pub fn default_limit(self) -> u32 {
        match self {
            CatalogView::Public => PUBLIC_PAGE_SIZE,
            CatalogView::Employee => EMPLOYEE_PAGE_SIZE,
        }
    }

    /// `stock` ordering only exists in the employee catalog.
    pub fn allows_sort(self, key: SortKey) -> bool {
        key != SortKey::Stock || self == CatalogView::Employee
    }

    /// The public snapshot is pre-filtered to active products, so an `active`
    /// filter is meaningless there.
    pub fn allows_active_filter(self) -> bool {
        self == CatalogView::Employee
    }
}

/// Sort key. Wire names are the original Spanish query values.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    Name,
    Price,
    /// By identifier: lower id is less recent.
    Recent,
    Stock,
}

impl SortKey {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "nombre" => Some(Self::Name),
            "precio" => Some(Self::Price),
            "reciente" => Some(Self::Recent),
            "stock" => Some(Self::Stock),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "asc" => Some(Self::Asc),
            "desc" => Some(Self::Desc),
            _ => None,
        }
    }
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct SortSpec {
    pub key: SortKey,
    pub direction: SortDirection,
}

/// Optional predicates, AND-combined. `None` means "filter absent"; the
/// request layer discards malformed raw values instead of erroring.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogFilter {
    /// Case-insensitive substring match on the product name.
    pub name: Option<String>,
    pub category_id: Option<CategoryId>,
    /// Employee catalog only; ignored under [`CatalogView::Public`].
    pub active: Option<bool>,
    pub is_promotion: Option<bool>,
    /// Inclusive lower bound, applied only when `>= 0`.
    pub price_min: Option<f64>,
    /// Inclusive upper bound, applied only when `>= 0`.
    pub price_max: Option<f64>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub limit: u32,
}

impl PageRequest {
    /// Defaulted page request: page 1, view-specific limit. Zero values are
    /// treated as absent.
    pub fn new(view: CatalogView, page: Option<u32>, limit: Option<u32>) -> Self {
        Self {
            page: page.filter(|p| *p > 0).unwrap_or(1),
            limit: limit.filter(|l| *l > 0).unwrap_or(view.default_limit()),
        }
    }
}

/// One page of an ordered, filtered catalog.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage {
    pub items: Vec<Product>,
    /// Count after filtering, before pagination.
    pub total: usize,
    pub page: u32,
    pub total_pages: u32,
}

impl CatalogPage {
    fn empty() -> Self {
        Self {
            items: Vec::new(),
            total: 0,
            page: 1,
            total_pages: 0,
        }
    }
}

/// Run a catalog query over a point-in-time snapshot.
///
/// Never fails: inputs are pre-validated/defaulted by the caller, filters a
/// view does not support are ignored, and an out-of-range page yields an
/// empty `items` slice with `total`/`total_pages` intact.
pub fn query(
    view: CatalogView,
    snapshot: Vec<Product>,
    filter: &CatalogFilter,
    sort: SortSpec,
    page: PageRequest,
) -> CatalogPage {
    if snapshot.is_empty() {
        return CatalogPage::empty();
    }

    let mut items = snapshot;
    apply_filters(view, &mut items, filter);
    sort_items(view, &mut items, sort);

    let total = items.len();
    let limit = page.limit.max(1) as usize;
    let total_pages = items.len().div_ceil(limit) as u32;
    // `PageRequest::new` establishes page >= 1, but the fields are public.
    let start = (page.page.max(1) as usize - 1).saturating_mul(limit);
    let items = items.into_iter().skip(start).take(limit).collect();

    CatalogPage {
        items,
        total,
        page: page.page,
        total_pages,
    }
}

fn apply_filters(view: CatalogView, items: &mut Vec<Product>, filter: &CatalogFilter) {
    if let Some(name) = filter.name.as_deref().filter(|n| !n.trim().is_empty()) {
        let needle = name.to_lowercase();
        items.retain(|p| p.name.to_lowercase().contains(&needle));
    }
    if let Some(category_id) = filter.category_id {
        items.retain(|p| p.category_id == Some(category_id));
    }
    if view.allows_active_filter()
        && let Some(active) = filter.active
    {
        items.retain(|p| p.active == active);
    }
    if let Some(is_promotion) = filter.is_promotion {
        items.retain(|p| p.is_promotion == is_promotion);
    }
    if let Some(min) = filter.price_min.filter(|m| *m >= 0.0) {
        items.retain(|p| p.price >= min);
    }
    if let Some(max) = filter.price_max.filter(|m| *m >= 0.0) {
        items.retain(|p| p.price <= max);
    }
}

fn sort_items(view: CatalogView, items: &mut [Product], sort: SortSpec) {
    let key = if view.allows_sort(sort.key) {
        sort.key
    } else {
        SortKey::default()
    };

    // Stable ascending sort; descending reverses the sorted sequence rather
    // than flipping the comparator, so equal keys end up in reversed original
    // order under both directions consistently.
    match key {
        SortKey::Name => items.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase())),
        SortKey::Price => items.sort_by(|a, b| a.price.total_cmp(&b.price)),
        SortKey::Recent => items.sort_by_key(|p| p.id),
        SortKey::Stock => items.sort_by_key(|p| p.current_stock),
    }

    if sort.direction == SortDirection::Desc {
        items.reverse();
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use stockroom_core::ProductId;

    use super::*;

    fn product(id: u32, name: &str, price: f64, stock: u32, active: bool) -> Product {
        Product {
            id: ProductId::new(id),
            name: name.to_string(),
            price,
            current_stock: stock,
            minimum_stock: 0,
            is_promotion: false,
            active,
            description: None,
            image_url: "/images/default-product.svg".to_string(),
            category_id: None,
        }
    }

    /// The three-product scenario: Café(10, active), Azúcar(5, active),
    /// Sal(5, inactive).
    fn scenario() -> Vec<Product> {
        vec![
            product(1, "Café", 10.0, 3, true),
            product(2, "Azúcar", 5.0, 8, true),
            product(3, "Sal", 5.0, 1, false),
        ]
    }

    fn active_only(items: Vec<Product>) -> Vec<Product> {
        items.into_iter().filter(|p| p.active).collect()
    }

    fn names(page: &CatalogPage) -> Vec<&str> {
        page.items.iter().map(|p| p.name.as_str()).collect()
    }

    fn sort(key: SortKey, direction: SortDirection) -> SortSpec {
        SortSpec { key, direction }
    }

    #[test]
    fn empty_snapshot_yields_page_one_with_no_items() {
        let page = query(
            CatalogView::Public,
            Vec::new(),
            &CatalogFilter::default(),
            SortSpec::default(),
            PageRequest { page: 5, limit: 12 },
        );
        assert_eq!(page, CatalogPage {
            items: Vec::new(),
            total: 0,
            page: 1,
            total_pages: 0,
        });
    }

    #[test]
    fn public_catalog_price_asc_over_active_snapshot() {
        // Store pre-filters the public snapshot to active products; Sal never
        // reaches the engine.
        let page = query(
            CatalogView::Public,
            active_only(scenario()),
            &CatalogFilter::default(),
            sort(SortKey::Price, SortDirection::Asc),
            PageRequest::new(CatalogView::Public, None, None),
        );
        assert_eq!(names(&page), vec!["Azúcar", "Café"]);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 1);
    }

    #[test]
    fn employee_catalog_filters_by_inactive_state() {
        let filter = CatalogFilter {
            active: Some(false),
            ..Default::default()
        };
        let page = query(
            CatalogView::Employee,
            scenario(),
            &filter,
            SortSpec::default(),
            PageRequest::new(CatalogView::Employee, None, None),
        );
        assert_eq!(names(&page), vec!["Sal"]);
        assert_eq!(page.total, 1);
    }

    #[test]
    fn active_filter_is_ignored_on_the_public_view() {
        let filter = CatalogFilter {
            active: Some(false),
            ..Default::default()
        };
        let page = query(
            CatalogView::Public,
            active_only(scenario()),
            &filter,
            SortSpec::default(),
            PageRequest::new(CatalogView::Public, None, None),
        );
        assert_eq!(page.total, 2);
    }

    #[test]
    fn second_page_of_limit_one_holds_the_second_item() {
        let page = query(
            CatalogView::Public,
            active_only(scenario()),
            &CatalogFilter::default(),
            sort(SortKey::Price, SortDirection::Asc),
            PageRequest { page: 2, limit: 1 },
        );
        assert_eq!(names(&page), vec!["Café"]);
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 2);
        assert_eq!(page.page, 2);
    }

    #[test]
    fn page_past_the_end_is_empty_but_totals_hold() {
        let page = query(
            CatalogView::Public,
            active_only(scenario()),
            &CatalogFilter::default(),
            SortSpec::default(),
            PageRequest { page: 99, limit: 12 },
        );
        assert!(page.items.is_empty());
        assert_eq!(page.total, 2);
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.page, 99);
    }

    #[test]
    fn page_zero_behaves_like_the_first_page() {
        // Possible when the struct is built directly instead of through
        // `PageRequest::new`; must not underflow the slice offset.
        let page = query(
            CatalogView::Public,
            active_only(scenario()),
            &CatalogFilter::default(),
            sort(SortKey::Price, SortDirection::Asc),
            PageRequest { page: 0, limit: 1 },
        );
        assert_eq!(names(&page), vec!["Azúcar"]);
        assert_eq!(page.total, 2);
    }

    #[test]
    fn name_filter_matches_substrings_case_insensitively() {
        let filter = CatalogFilter {
            name: Some("AFÉ".to_string()),
            ..Default::default()
        };
        let page = query(
            CatalogView::Employee,
            scenario(),
            &filter,
            SortSpec::default(),
            PageRequest::new(CatalogView::Employee, None, None),
        );
        assert_eq!(names(&page), vec!["Café"]);
    }

    #[test]
    fn blank_name_filter_is_treated_as_absent() {
        let filter = CatalogFilter {
            name: Some("   ".to_string()),
            ..Default::default()
        };
        let page = query(
            CatalogView::Employee,
            scenario(),
            &filter,
            SortSpec::default(),
            PageRequest::new(CatalogView::Employee, None, None),
        );
        assert_eq!(page.total, 3);
    }

    #[test]
    fn price_bounds_are_inclusive() {
        let filter = CatalogFilter {
            price_min: Some(5.0),
            price_max: Some(5.0),
            ..Default::default()
        };
        let page = query(
            CatalogView::Employee,
            scenario(),
            &filter,
            SortSpec::default(),
            PageRequest::new(CatalogView::Employee, None, None),
        );
        assert_eq!(page.total, 2); // Azúcar and Sal, both at 5.0
    }

    #[test]
    fn negative_price_bound_is_ignored() {
        let filter = CatalogFilter {
            price_min: Some(-1.0),
            ..Default::default()
        };
        let page = query(
            CatalogView::Employee,
            scenario(),
            &filter,
            SortSpec::default(),
            PageRequest::new(CatalogView::Employee, None, None),
        );
        assert_eq!(page.total, 3);
    }

    #[test]
    fn stock_sort_works_on_the_employee_view() {
        let page = query(
            CatalogView::Employee,
            scenario(),
            &CatalogFilter::default(),
            sort(SortKey::Stock, SortDirection::Asc),
            PageRequest::new(CatalogView::Employee, None, None),
        );
        assert_eq!(names(&page), vec!["Sal", "Café", "Azúcar"]);
    }

    #[test]
    fn stock_sort_falls_back_to_name_on_the_public_view() {
        let page = query(
            CatalogView::Public,
            active_only(scenario()),
            &CatalogFilter::default(),
            sort(SortKey::Stock, SortDirection::Asc),
            PageRequest::new(CatalogView::Public, None, None),
        );
        assert_eq!(names(&page), vec!["Azúcar", "Café"]);
    }

    #[test]
    fn recent_sort_orders_by_identifier() {
        let page = query(
            CatalogView::Employee,
            scenario(),
            &CatalogFilter::default(),
            sort(SortKey::Recent, SortDirection::Desc),
            PageRequest::new(CatalogView::Employee, None, None),
        );
        assert_eq!(names(&page), vec!["Sal", "Azúcar", "Café"]);
    }

    #[test]
    fn equal_keys_keep_insertion_order_ascending() {
        let page = query(
            CatalogView::Employee,
            scenario(),
            &CatalogFilter::default(),
            sort(SortKey::Price, SortDirection::Asc),
            PageRequest::new(CatalogView::Employee, None, None),
        );
        // Azúcar (id 2) precedes Sal (id 3): both at 5.0, insertion order kept.
        assert_eq!(names(&page), vec!["Azúcar", "Sal", "Café"]);
    }

    #[test]
    fn descending_reverses_the_whole_sequence_including_ties() {
        let page = query(
            CatalogView::Employee,
            scenario(),
            &CatalogFilter::default(),
            sort(SortKey::Price, SortDirection::Desc),
            PageRequest::new(CatalogView::Employee, None, None),
        );
        assert_eq!(names(&page), vec!["Café", "Sal", "Azúcar"]);
    }

    #[test]
    fn sort_key_and_direction_parse_wire_values() {
        assert_eq!(SortKey::parse("precio"), Some(SortKey::Price));
        assert_eq!(SortKey::parse("stock"), Some(SortKey::Stock));
        assert_eq!(SortKey::parse("price"), None);
        assert_eq!(SortDirection::parse("desc"), Some(SortDirection::Desc));
        assert_eq!(SortDirection::parse("DESC"), None);
    }

    fn arb_products() -> impl Strategy<Value = Vec<Product>> {
        prop::collection::vec(
            ("[a-zA-Záé ]{0,12}", 0u32..10_000, 0u32..500, any::<bool>(), any::<bool>()),
            0..40,
        )
        .prop_map(|rows| {
            rows.into_iter()
                .enumerate()
                .map(|(i, (name, cents, stock, active, promo))| {
                    let mut p = product(i as u32 + 1, &name, f64::from(cents) / 100.0, stock, active);
                    p.is_promotion = promo;
                    p
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn totals_are_page_independent(
            products in arb_products(),
            page in 1u32..20,
            limit in 1u32..30,
        ) {
            let filter = CatalogFilter::default();
            let expected = query(
                CatalogView::Employee,
                products.clone(),
                &filter,
                SortSpec::default(),
                PageRequest { page: 1, limit },
            );
            let got = query(
                CatalogView::Employee,
                products,
                &filter,
                SortSpec::default(),
                PageRequest { page, limit },
            );
            prop_assert_eq!(got.total, expected.total);
            prop_assert_eq!(got.total_pages, expected.total_pages);
            prop_assert_eq!(got.total_pages as usize, got.total.div_ceil(limit as usize));
        }

        #[test]
        fn pages_past_the_end_are_empty(
            products in arb_products(),
            limit in 1u32..30,
            extra in 1u32..10,
        ) {
            let first = query(
                CatalogView::Employee,
                products.clone(),
                &CatalogFilter::default(),
                SortSpec::default(),
                PageRequest { page: 1, limit },
            );
            let beyond = first.total_pages.max(1) + extra;
            let got = query(
                CatalogView::Employee,
                products,
                &CatalogFilter::default(),
                SortSpec::default(),
                PageRequest { page: beyond, limit },
            );
            prop_assert!(got.items.is_empty());
            prop_assert_eq!(got.total, first.total);
        }

        #[test]
        fn filtering_is_idempotent(products in arb_products(), needle in "[a-zá ]{0,4}") {
            let filter = CatalogFilter {
                name: Some(needle),
                is_promotion: Some(true),
                price_min: Some(10.0),
                ..Default::default()
            };
            let mut once = products;
            apply_filters(CatalogView::Employee, &mut once, &filter);
            let mut twice = once.clone();
            apply_filters(CatalogView::Employee, &mut twice, &filter);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn asc_reversed_equals_desc_for_unique_prices(products in arb_products()) {
            // Drop duplicate prices so the property holds exactly.
            let mut seen = std::collections::HashSet::new();
            let unique: Vec<Product> = products
                .into_iter()
                .filter(|p| seen.insert(p.price.to_bits()))
                .collect();

            let limit = unique.len().max(1) as u32;
            let mut asc = query(
                CatalogView::Employee,
                unique.clone(),
                &CatalogFilter::default(),
                SortSpec { key: SortKey::Price, direction: SortDirection::Asc },
                PageRequest { page: 1, limit },
            );
            let desc = query(
                CatalogView::Employee,
                unique,
                &CatalogFilter::default(),
                SortSpec { key: SortKey::Price, direction: SortDirection::Desc },
                PageRequest { page: 1, limit },
            );
            asc.items.reverse();
            prop_assert_eq!(asc.items, desc.items);
        }
    }
}
