pub mod change_propagator;
pub mod http_client;
pub mod inspector;
pub mod project_state;
pub mod table_view;

#[cfg(test)]
mod change_propagator_test;
#[cfg(test)]
pub(crate) mod test_support;
