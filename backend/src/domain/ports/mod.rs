//! Domain ports for the hexagonal boundary.
//!
//! Authentication sources talk to the outside world through these traits
//! only: the user store that owns account records, and the session framework
//! that turns a resolved account into a server-tracked login session.

mod session_gateway;
mod user_repository;

#[cfg(test)]
pub use session_gateway::MockSessionGateway;
pub use session_gateway::{SessionGateway, SessionGatewayError};
#[cfg(test)]
pub use user_repository::MockUserRepository;
pub use user_repository::{UserPersistenceError, UserRepository};
