mod hasura;

pub use hasura::HasuraApi;
