//! Authentication primitives.
//!
//! Login selects an existing actor by id; there are no passwords. The
//! resulting session is an HS256 access token, see [`jwt`].

pub mod jwt;
