pub mod auth_service;
pub mod comment_service;
pub mod post_service;
pub mod profile_service;

#[cfg(test)]
pub(crate) mod test_support;
