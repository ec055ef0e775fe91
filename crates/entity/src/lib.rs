//! Entity definitions for the Guichet ticketing service
//!
//! This crate contains Sea-ORM entity definitions for the database models.

pub mod sea_orm_active_enums;

pub mod clients;
pub use clients::Entity as Clients;
pub mod demandeurs;
pub use demandeurs::Entity as Demandeurs;
pub mod ticket_comments;
pub use ticket_comments::Entity as TicketComments;
pub mod tickets;
pub use tickets::Entity as Tickets;
pub mod users;
pub use users::Entity as Users;
