//! Waitlist of players waiting for a seat.
//!
//! Entries keep their arrival order. The only mutation after joining is
//! removal, either when the player is seated or when they leave.
//!
//! ## Example
//!
//! ```
//! use card_room::waitlist::{EntryMatcher, NewWaitlistEntry, WaitlistQueue};
//!
//! let mut queue = WaitlistQueue::new(50);
//! queue.enqueue(NewWaitlistEntry::new("P001", "Dana", "Omaha")).unwrap();
//! let entry = queue
//!     .enqueue(NewWaitlistEntry::new("P002", "Eli", "Omaha").prefer_seat(1, 3))
//!     .unwrap();
//! assert_eq!(entry.position, 2);
//!
//! queue.dequeue(&EntryMatcher::Player("P001".into())).unwrap();
//! assert_eq!(queue.get(entry.id).unwrap().position, 1);
//! ```

pub mod errors;
pub mod models;
pub mod queue;

pub use errors::{WaitlistError, WaitlistResult};
pub use models::{EntryId, EntryMatcher, NewWaitlistEntry, PlayerId, WaitlistEntry};
pub use queue::{DEFAULT_WAITLIST_CAPACITY, WaitlistQueue};
