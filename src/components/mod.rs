// UI Components
// Placeholder blocks for profile features that have no backing service yet

pub mod degree_plan_card;
pub mod friends_list;
pub mod icons;
pub mod profile_avatar;
pub mod semester_card;

pub use degree_plan_card::DegreePlanCard;
pub use friends_list::FriendsList;
pub use profile_avatar::ProfileAvatar;
pub use semester_card::SemesterCard;
