//! # Back-Office Commands
//!
//! Everything the frontend can invoke. Each command takes `&AppContext`
//! plus its payload and returns `ApiResult<T>`.
//!
//! ## Command Organization
//! ```text
//! commands/
//! ├── mod.rs        ◄─── You are here (exports)
//! ├── auth.rs       ◄─── Sign in / out, current employee
//! ├── customer.rs   ◄─── Customer registration and listing
//! ├── product.rs    ◄─── Product CRUD, snapshot for the entry form
//! ├── employee.rs   ◄─── Staff registration (login + record)
//! ├── order.rs      ◄─── Delivery order checkout, recent orders
//! ├── sale.rs       ◄─── Counter sale checkout, recent sales
//! └── dashboard.rs  ◄─── Summary cards and recent lists
//! ```
//!
//! ## Reads and Writes
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  list_products(ctx)                                                    │
//! │     └── ctx.cache.fetch(Products, || ctx.db.products().list_active())  │
//! │                                                                         │
//! │  register_product(ctx, form)                                           │
//! │     ├── validate form (joshub-core)                                    │
//! │     └── ctx.cache.mutate([Products, Dashboard], insert)                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod auth;
pub mod customer;
pub mod dashboard;
pub mod employee;
pub mod order;
pub mod product;
pub mod sale;
