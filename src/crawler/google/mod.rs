//! # Google 財經採集模組
//!
//! 從報價頁面的 `<meta itemprop=...>` 標籤取出最新成交價與報價時間。
//!
//! - 來源域名：`finance.google.com`
//! - 抓取技術：HTTP GET 搭配正規表示式，不建立 DOM。

/// 最新成交價與報價日期
pub mod price;

/// Google 財經採集器
pub struct Google {}
