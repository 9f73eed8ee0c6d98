//! SeaORM entity definitions
//!
//! These are database-specific entities separate from domain models.
//! Relations are declared for query building only; the schema carries no
//! foreign key between `posts` and `users`.

pub mod post;
pub mod user;

pub use post::{ActiveModel as PostActiveModel, Entity as PostEntity, Model as PostModel, Tags};
pub use user::{ActiveModel as UserActiveModel, Entity as UserEntity, Model as UserModel};
