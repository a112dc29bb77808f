pub use super::tag::Entity as Tag;
pub use super::todo::Entity as Todo;
pub use super::todo_tag::Entity as TodoTag;
pub use super::user::Entity as User;
