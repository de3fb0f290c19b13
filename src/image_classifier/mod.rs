pub mod adapter;
pub mod impl_fake;
#[cfg(feature = "backend-tract")]
pub mod impl_tract;
pub mod interface;
#[cfg_attr(not(feature = "backend-tract"), allow(dead_code))]
pub mod metadata;
#[cfg(feature = "backend-tract")]
pub mod tract;
