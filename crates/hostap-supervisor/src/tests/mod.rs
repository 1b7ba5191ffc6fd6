//! Test suites for the access point supervisor.

mod support;
