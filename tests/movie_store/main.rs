mod persistence;
mod support;
