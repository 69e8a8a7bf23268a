//! Bundled demo dataset (2012–2024).
//!
//! Lets `wdash` run with no network and no local file. Figures are
//! illustrative annual values assembled from public sources; the two
//! `*_index_2012` columns are pre-computed in the data on purpose, because
//! the composer treats source-provided index columns as authoritative.

pub const SAMPLE_CSV: &str = "\
year,sp500_total_return_pct,global_pe_aum_usd_trn,us_gclass_sales_units,g550_base_msrp_usd,gclass_est_atp_usd_proxy,g550_msrp_index_2012,gclass_est_atp_index_2012,hh_net_worth_usd_bn_q4
2012,16.0,2.0,1408,113905,127600,100.0,100.0,70862
2013,32.4,2.3,2090,113905,127600,100.0,100.0,79722
2014,13.7,2.4,3091,115365,129200,101.3,101.3,84204
2015,1.4,2.8,3616,119900,134300,105.3,105.3,86684
2016,12.0,3.1,3950,119900,134300,105.3,105.3,92269
2017,21.8,3.5,4188,122400,137100,107.5,107.4,100090
2018,-4.4,4.0,4108,123600,138400,108.5,108.5,98239
2019,31.5,4.5,5558,124500,139400,109.3,109.2,111389
2020,18.4,5.3,5794,130900,146600,114.9,114.9,123867
2021,28.7,6.3,7078,131750,147600,115.7,115.7,141069
2022,-18.1,7.0,6380,131750,147600,115.7,115.7,135392
2023,26.3,7.6,8900,139900,156700,122.8,122.8,147645
2024,25.0,8.2,9500,143000,160200,125.5,125.5,160000
";
