//! Member domain
//!
//! The `member`/`team` tables used by the search examples and integration
//! tests, the projections they are read into, and the member search.

pub mod dto;
pub mod entity;
pub mod repository;
pub mod search;

pub use dto::{MemberDto, MemberTeamDto, UserDto};
pub use entity::{Member, Team, member, team};
pub use repository::MemberRepository;
pub use search::{MemberCriterion, MemberSearchCondition};
