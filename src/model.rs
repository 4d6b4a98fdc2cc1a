mod icon;
mod image_asset;
mod scenario;


pub use icon::IconKind;
pub use image_asset::{
    ImageAsset, SUPPORTED_DATA_URI_SUBTYPES, strip_data_uri_prefix, with_data_uri_prefix,
};
pub use scenario::Scenario;
