//! Cache key derivation.
//!
//! Every field is length-prefixed before hashing, so two distinct inputs can
//! never produce the same byte stream by shifting text between fields.

use sha2::{Digest, Sha256};

use code_review_core::types::{
    AnalysisRequest, CacheKey, CandidateLevel, FileEntry, RepositoryReference,
};

fn update_field(hasher: &mut Sha256, bytes: &[u8]) {
    hasher.update((bytes.len() as u64).to_le_bytes());
    hasher.update(bytes);
}

fn finish(hasher: Sha256) -> CacheKey {
    CacheKey::from_digest(format!("{:x}", hasher.finalize()))
}

/// Fingerprint of (description, level, listing).
///
/// Listing order is significant.
pub fn fingerprint(description: &str, level: CandidateLevel, files: &[FileEntry]) -> CacheKey {
    let mut hasher = Sha256::new();
    update_field(&mut hasher, b"listing");
    update_field(&mut hasher, description.as_bytes());
    update_field(&mut hasher, level.as_str().as_bytes());

    hasher.update((files.len() as u64).to_le_bytes());
    for file in files {
        update_field(&mut hasher, file.name.as_bytes());
        update_field(&mut hasher, file.kind.as_str().as_bytes());
        match file.download_url {
            Some(ref url) => {
                hasher.update([1u8]);
                update_field(&mut hasher, url.as_bytes());
            }
            None => hasher.update([0u8]),
        }
    }

    finish(hasher)
}

/// Fingerprint of an assembled [`AnalysisRequest`].
pub fn fingerprint_request(request: &AnalysisRequest) -> CacheKey {
    fingerprint(&request.description, request.level, &request.listing)
}

/// Fingerprint of the pre-fetch request fields (reference, description, level).
pub fn request_fingerprint(
    reference: &RepositoryReference,
    description: &str,
    level: CandidateLevel,
) -> CacheKey {
    let mut hasher = Sha256::new();
    update_field(&mut hasher, b"request");
    update_field(&mut hasher, reference.owner.as_bytes());
    update_field(&mut hasher, reference.name.as_bytes());
    update_field(&mut hasher, description.as_bytes());
    update_field(&mut hasher, level.as_str().as_bytes());
    finish(hasher)
}
