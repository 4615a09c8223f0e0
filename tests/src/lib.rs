#![cfg(test)]

mod dispatch;
