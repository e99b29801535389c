pub mod enrich;
pub mod persistence;
pub mod store;

pub use enrich::{
    import_products, normalize_name, read_raw_products, RawProduct, MAX_IMPORTED_PRODUCTS,
};
pub use persistence::{load_catalog, load_request, save_catalog};
pub use store::{Catalog, FUZZY_MATCH_THRESHOLD};
