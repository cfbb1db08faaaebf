/*!
 * Model signal tests entry point
 */

#[path = "models/user_save_test.rs"]
mod user_save_test;

#[path = "models/global_dispatcher_test.rs"]
mod global_dispatcher_test;
