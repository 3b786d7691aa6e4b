//! Business logic behind the HTTP routes.

pub mod catalog;
pub mod contact;
pub mod directory;
pub mod email;
pub mod listing;

pub use catalog::{CatalogError, ShopCatalog, ShopList};
pub use contact::{ContactError, ContactNotifier, ContactSubmission};
pub use directory::{AddressInput, DirectoryError, DirectoryService, ShopInput};
pub use email::{MailError, MailTransport, OutboundEmail, SmtpMailer};
pub use listing::{GooglePlacesClient, ListingError, ListingService, PlaceDetailsSource};
