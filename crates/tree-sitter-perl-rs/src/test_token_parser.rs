//! Test the token parser components
