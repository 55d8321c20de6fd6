//! Domain entities - cached objects referenced by gateway events

mod channel;
mod guild;
mod member;
mod user;

pub use channel::{MessageChannel, PrivateChannel, TextChannel};
pub use guild::Guild;
pub use member::GuildMember;
pub use user::User;
