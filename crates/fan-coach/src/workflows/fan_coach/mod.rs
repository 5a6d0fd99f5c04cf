//! Fan coach application intake: the wizard that collects answers and the
//! endpoint that relays a finished application by e-mail.

pub mod form;
pub mod submission;
