//! Mentor-student roster and student profiles.
//!
//! An active [`domain::MentorStudentLink`] is what authorizes a mentor to act
//! on a student: assigning tasks, issuing warnings and editing the profile
//! all trace back to it. Links are deactivated rather than deleted so that
//! history survives. Student profiles carry the warning counter cache that
//! the warning lifecycle maintains.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
