//! Image URL resolution.
//!
//! The content store never sends image URLs — it sends opaque asset
//! references like `image-abc123-2000x1000-jpg`. This module turns one of
//! those plus target dimensions into a fully qualified CDN URL. It is a
//! pure formatting function against the image service's URL contract: no
//! network call happens here, the service fetches and scales lazily when
//! the browser requests the URL.
//!
//! ## Resolution outcomes
//!
//! `None` is not an error anywhere in this module:
//! - connection config incomplete (no project id or dataset) → `None`
//! - asset ref that doesn't follow the `image-<id>-<WxH>-<format>` shape
//!   → `None`
//!
//! Pages never show a `None`: [`image_url_or_placeholder`] substitutes a
//! fixed placeholder so markup always gets a non-empty `src`.

use crate::config::StudioConfig;
use crate::model::ImageRef;

/// Shown whenever an image cannot be resolved, for any reason.
pub const PLACEHOLDER_IMAGE_URL: &str = "https://via.placeholder.com/550x310";

const IMAGE_CDN_HOST: &str = "cdn.sanity.io";

/// Build the CDN URL for an image at the requested dimensions.
///
/// Deterministic: the same config, ref, and dimensions always produce the
/// same string.
pub fn image_url(
    config: &StudioConfig,
    image: &ImageRef,
    width: u32,
    height: u32,
) -> Option<String> {
    if !config.is_complete() {
        return None;
    }
    let filename = asset_filename(&image.asset.id)?;
    Some(format!(
        "https://{IMAGE_CDN_HOST}/images/{}/{}/{filename}?w={width}&h={height}",
        config.project_id, config.dataset,
    ))
}

/// Like [`image_url`], but resolves an absent or unresolvable image to the
/// fixed placeholder. This is what page rendering uses.
pub fn image_url_or_placeholder(
    config: &StudioConfig,
    image: Option<&ImageRef>,
    width: u32,
    height: u32,
) -> String {
    image
        .and_then(|img| image_url(config, img, width, height))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE_URL.to_string())
}

/// Convert an asset ref to its CDN filename.
///
/// `image-abc123-2000x1000-jpg` → `abc123-2000x1000.jpg`. The ref carries
/// the asset id, the source dimensions, and the format, separated by
/// dashes; the filename keeps the first two and turns the format into an
/// extension.
fn asset_filename(asset_ref: &str) -> Option<String> {
    let rest = asset_ref.strip_prefix("image-")?;
    let (stem, format) = rest.rsplit_once('-')?;
    if stem.is_empty() || format.is_empty() {
        return None;
    }
    // The stem must end in a WxH dimension tail.
    let (_, dims) = stem.rsplit_once('-')?;
    let (w, h) = dims.split_once('x')?;
    if w.is_empty() || h.is_empty() {
        return None;
    }
    if !w.bytes().all(|b| b.is_ascii_digit()) || !h.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    Some(format!("{stem}.{format}"))
}
