pub mod images;
pub mod products;
pub mod users;

pub mod prelude {
    pub use super::images::Entity as Images;
    pub use super::products::Entity as Products;
    pub use super::users::Entity as Users;
}
