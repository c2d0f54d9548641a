//! The fixed, precomputed 256-entry rANS cumulative distribution table.
//!
//! Ground truth: `library/common/cdf-tables.cpp` in the Ako sources. The
//! table is an empirical fit over coefficient statistics from the
//! original corpus; it is not recomputed at runtime (spec.md §4.2, §9's
//! "global CDF table... model as a static immutable array" note).

/// One entry of the rANS symbol table: `root`/`suffix_length` decompose a
/// 16-bit symbol value as `root + suffix`, with `suffix` carried as
/// `suffix_length` raw bits alongside the rANS-coded root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CdfEntry {
    pub root: u16,
    pub suffix_length: u16,
    pub frequency: u16,
    pub cumulative: u16,
}

pub const CDF_LEN: usize = 256;

pub const CDF_TABLE: [CdfEntry; CDF_LEN] = [
    CdfEntry { root: 0, suffix_length: 0, frequency: 11844, cumulative: 0 },
    CdfEntry { root: 2, suffix_length: 0, frequency: 8964, cumulative: 11844 },
    CdfEntry { root: 1, suffix_length: 0, frequency: 8230, cumulative: 20808 },
    CdfEntry { root: 4, suffix_length: 0, frequency: 4770, cumulative: 29038 },
    CdfEntry { root: 3, suffix_length: 0, frequency: 4250, cumulative: 33808 },
    CdfEntry { root: 6, suffix_length: 0, frequency: 2735, cumulative: 38058 },
    CdfEntry { root: 5, suffix_length: 0, frequency: 2567, cumulative: 40793 },
    CdfEntry { root: 8, suffix_length: 0, frequency: 1846, cumulative: 43360 },
    CdfEntry { root: 7, suffix_length: 0, frequency: 1737, cumulative: 45206 },
    CdfEntry { root: 10, suffix_length: 0, frequency: 1362, cumulative: 46943 },
    CdfEntry { root: 9, suffix_length: 0, frequency: 1279, cumulative: 48305 },
    CdfEntry { root: 12, suffix_length: 0, frequency: 1059, cumulative: 49584 },
    CdfEntry { root: 11, suffix_length: 0, frequency: 992, cumulative: 50643 },
    CdfEntry { root: 14, suffix_length: 0, frequency: 851, cumulative: 51635 },
    CdfEntry { root: 13, suffix_length: 0, frequency: 795, cumulative: 52486 },
    CdfEntry { root: 16, suffix_length: 0, frequency: 703, cumulative: 53281 },
    CdfEntry { root: 15, suffix_length: 0, frequency: 656, cumulative: 53984 },
    CdfEntry { root: 18, suffix_length: 0, frequency: 587, cumulative: 54640 },
    CdfEntry { root: 17, suffix_length: 0, frequency: 549, cumulative: 55227 },
    CdfEntry { root: 20, suffix_length: 0, frequency: 500, cumulative: 55776 },
    CdfEntry { root: 19, suffix_length: 0, frequency: 466, cumulative: 56276 },
    CdfEntry { root: 22, suffix_length: 0, frequency: 431, cumulative: 56742 },
    CdfEntry { root: 21, suffix_length: 0, frequency: 400, cumulative: 57173 },
    CdfEntry { root: 24, suffix_length: 0, frequency: 373, cumulative: 57573 },
    CdfEntry { root: 23, suffix_length: 0, frequency: 347, cumulative: 57946 },
    CdfEntry { root: 26, suffix_length: 0, frequency: 326, cumulative: 58293 },
    CdfEntry { root: 25, suffix_length: 0, frequency: 303, cumulative: 58619 },
    CdfEntry { root: 28, suffix_length: 0, frequency: 286, cumulative: 58922 },
    CdfEntry { root: 27, suffix_length: 0, frequency: 266, cumulative: 59208 },
    CdfEntry { root: 30, suffix_length: 0, frequency: 253, cumulative: 59474 },
    CdfEntry { root: 29, suffix_length: 0, frequency: 236, cumulative: 59727 },
    CdfEntry { root: 32, suffix_length: 0, frequency: 226, cumulative: 59963 },
    CdfEntry { root: 31, suffix_length: 0, frequency: 210, cumulative: 60189 },
    CdfEntry { root: 34, suffix_length: 0, frequency: 203, cumulative: 60399 },
    CdfEntry { root: 33, suffix_length: 0, frequency: 188, cumulative: 60602 },
    CdfEntry { root: 36, suffix_length: 0, frequency: 182, cumulative: 60790 },
    CdfEntry { root: 35, suffix_length: 0, frequency: 170, cumulative: 60972 },
    CdfEntry { root: 38, suffix_length: 0, frequency: 164, cumulative: 61142 },
    CdfEntry { root: 37, suffix_length: 0, frequency: 152, cumulative: 61306 },
    CdfEntry { root: 40, suffix_length: 0, frequency: 148, cumulative: 61458 },
    CdfEntry { root: 39, suffix_length: 0, frequency: 139, cumulative: 61606 },
    CdfEntry { root: 42, suffix_length: 0, frequency: 135, cumulative: 61745 },
    CdfEntry { root: 41, suffix_length: 0, frequency: 127, cumulative: 61880 },
    CdfEntry { root: 44, suffix_length: 0, frequency: 122, cumulative: 62007 },
    CdfEntry { root: 43, suffix_length: 0, frequency: 114, cumulative: 62129 },
    CdfEntry { root: 46, suffix_length: 0, frequency: 112, cumulative: 62243 },
    CdfEntry { root: 45, suffix_length: 0, frequency: 106, cumulative: 62355 },
    CdfEntry { root: 48, suffix_length: 0, frequency: 100, cumulative: 62461 },
    CdfEntry { root: 47, suffix_length: 0, frequency: 97, cumulative: 62561 },
    CdfEntry { root: 50, suffix_length: 0, frequency: 93, cumulative: 62658 },
    CdfEntry { root: 49, suffix_length: 0, frequency: 89, cumulative: 62751 },
    CdfEntry { root: 52, suffix_length: 0, frequency: 85, cumulative: 62840 },
    CdfEntry { root: 51, suffix_length: 0, frequency: 82, cumulative: 62925 },
    CdfEntry { root: 54, suffix_length: 0, frequency: 78, cumulative: 63007 },
    CdfEntry { root: 53, suffix_length: 0, frequency: 76, cumulative: 63085 },
    CdfEntry { root: 56, suffix_length: 0, frequency: 72, cumulative: 63161 },
    CdfEntry { root: 55, suffix_length: 0, frequency: 70, cumulative: 63233 },
    CdfEntry { root: 58, suffix_length: 0, frequency: 66, cumulative: 63303 },
    CdfEntry { root: 57, suffix_length: 0, frequency: 64, cumulative: 63369 },
    CdfEntry { root: 60, suffix_length: 0, frequency: 61, cumulative: 63433 },
    CdfEntry { root: 59, suffix_length: 0, frequency: 60, cumulative: 63494 },
    CdfEntry { root: 80, suffix_length: 1, frequency: 58, cumulative: 63554 },
    CdfEntry { root: 62, suffix_length: 0, frequency: 57, cumulative: 63612 },
    CdfEntry { root: 61, suffix_length: 0, frequency: 56, cumulative: 63669 },
    CdfEntry { root: 82, suffix_length: 1, frequency: 55, cumulative: 63725 },
    CdfEntry { root: 64, suffix_length: 0, frequency: 53, cumulative: 63780 },
    CdfEntry { root: 84, suffix_length: 1, frequency: 52, cumulative: 63833 },
    CdfEntry { root: 63, suffix_length: 0, frequency: 51, cumulative: 63885 },
    CdfEntry { root: 66, suffix_length: 0, frequency: 49, cumulative: 63936 },
    CdfEntry { root: 65, suffix_length: 0, frequency: 48, cumulative: 63985 },
    CdfEntry { root: 86, suffix_length: 1, frequency: 48, cumulative: 64033 },
    CdfEntry { root: 67, suffix_length: 0, frequency: 45, cumulative: 64081 },
    CdfEntry { root: 68, suffix_length: 0, frequency: 45, cumulative: 64126 },
    CdfEntry { root: 88, suffix_length: 1, frequency: 45, cumulative: 64171 },
    CdfEntry { root: 112, suffix_length: 2, frequency: 43, cumulative: 64216 },
    CdfEntry { root: 69, suffix_length: 0, frequency: 42, cumulative: 64259 },
    CdfEntry { root: 70, suffix_length: 0, frequency: 42, cumulative: 64301 },
    CdfEntry { root: 90, suffix_length: 1, frequency: 42, cumulative: 64343 },
    CdfEntry { root: 92, suffix_length: 1, frequency: 40, cumulative: 64385 },
    CdfEntry { root: 71, suffix_length: 0, frequency: 39, cumulative: 64425 },
    CdfEntry { root: 72, suffix_length: 0, frequency: 39, cumulative: 64464 },
    CdfEntry { root: 116, suffix_length: 2, frequency: 39, cumulative: 64503 },
    CdfEntry { root: 73, suffix_length: 0, frequency: 37, cumulative: 64542 },
    CdfEntry { root: 74, suffix_length: 0, frequency: 37, cumulative: 64579 },
    CdfEntry { root: 94, suffix_length: 1, frequency: 37, cumulative: 64616 },
    CdfEntry { root: 96, suffix_length: 1, frequency: 35, cumulative: 64653 },
    CdfEntry { root: 75, suffix_length: 0, frequency: 34, cumulative: 64688 },
    CdfEntry { root: 76, suffix_length: 0, frequency: 34, cumulative: 64722 },
    CdfEntry { root: 120, suffix_length: 2, frequency: 34, cumulative: 64756 },
    CdfEntry { root: 98, suffix_length: 1, frequency: 33, cumulative: 64790 },
    CdfEntry { root: 77, suffix_length: 0, frequency: 32, cumulative: 64823 },
    CdfEntry { root: 78, suffix_length: 0, frequency: 32, cumulative: 64855 },
    CdfEntry { root: 100, suffix_length: 1, frequency: 31, cumulative: 64887 },
    CdfEntry { root: 124, suffix_length: 2, frequency: 31, cumulative: 64918 },
    CdfEntry { root: 79, suffix_length: 0, frequency: 30, cumulative: 64949 },
    CdfEntry { root: 102, suffix_length: 1, frequency: 29, cumulative: 64979 },
    CdfEntry { root: 104, suffix_length: 1, frequency: 28, cumulative: 65008 },
    CdfEntry { root: 128, suffix_length: 2, frequency: 28, cumulative: 65036 },
    CdfEntry { root: 106, suffix_length: 1, frequency: 25, cumulative: 65064 },
    CdfEntry { root: 108, suffix_length: 1, frequency: 25, cumulative: 65089 },
    CdfEntry { root: 132, suffix_length: 2, frequency: 25, cumulative: 65114 },
    CdfEntry { root: 110, suffix_length: 1, frequency: 23, cumulative: 65139 },
    CdfEntry { root: 136, suffix_length: 2, frequency: 23, cumulative: 65162 },
    CdfEntry { root: 140, suffix_length: 2, frequency: 20, cumulative: 65185 },
    CdfEntry { root: 144, suffix_length: 2, frequency: 18, cumulative: 65205 },
    CdfEntry { root: 148, suffix_length: 2, frequency: 16, cumulative: 65223 },
    CdfEntry { root: 176, suffix_length: 3, frequency: 16, cumulative: 65239 },
    CdfEntry { root: 152, suffix_length: 2, frequency: 15, cumulative: 65255 },
    CdfEntry { root: 156, suffix_length: 2, frequency: 13, cumulative: 65270 },
    CdfEntry { root: 184, suffix_length: 3, frequency: 13, cumulative: 65283 },
    CdfEntry { root: 160, suffix_length: 2, frequency: 12, cumulative: 65296 },
    CdfEntry { root: 164, suffix_length: 2, frequency: 6, cumulative: 65308 },
    CdfEntry { root: 168, suffix_length: 2, frequency: 1, cumulative: 65314 },
    CdfEntry { root: 172, suffix_length: 2, frequency: 1, cumulative: 65315 },
    CdfEntry { root: 192, suffix_length: 3, frequency: 1, cumulative: 65316 },
    CdfEntry { root: 200, suffix_length: 3, frequency: 1, cumulative: 65317 },
    CdfEntry { root: 208, suffix_length: 3, frequency: 1, cumulative: 65318 },
    CdfEntry { root: 216, suffix_length: 3, frequency: 1, cumulative: 65319 },
    CdfEntry { root: 224, suffix_length: 3, frequency: 1, cumulative: 65320 },
    CdfEntry { root: 232, suffix_length: 3, frequency: 1, cumulative: 65321 },
    CdfEntry { root: 240, suffix_length: 3, frequency: 1, cumulative: 65322 },
    CdfEntry { root: 248, suffix_length: 3, frequency: 1, cumulative: 65323 },
    CdfEntry { root: 256, suffix_length: 3, frequency: 1, cumulative: 65324 },
    CdfEntry { root: 264, suffix_length: 3, frequency: 1, cumulative: 65325 },
    CdfEntry { root: 272, suffix_length: 3, frequency: 1, cumulative: 65326 },
    CdfEntry { root: 280, suffix_length: 3, frequency: 1, cumulative: 65327 },
    CdfEntry { root: 288, suffix_length: 3, frequency: 1, cumulative: 65328 },
    CdfEntry { root: 296, suffix_length: 3, frequency: 1, cumulative: 65329 },
    CdfEntry { root: 304, suffix_length: 4, frequency: 1, cumulative: 65330 },
    CdfEntry { root: 320, suffix_length: 4, frequency: 1, cumulative: 65331 },
    CdfEntry { root: 336, suffix_length: 4, frequency: 1, cumulative: 65332 },
    CdfEntry { root: 352, suffix_length: 4, frequency: 1, cumulative: 65333 },
    CdfEntry { root: 368, suffix_length: 4, frequency: 1, cumulative: 65334 },
    CdfEntry { root: 384, suffix_length: 4, frequency: 1, cumulative: 65335 },
    CdfEntry { root: 400, suffix_length: 4, frequency: 1, cumulative: 65336 },
    CdfEntry { root: 416, suffix_length: 4, frequency: 1, cumulative: 65337 },
    CdfEntry { root: 432, suffix_length: 4, frequency: 1, cumulative: 65338 },
    CdfEntry { root: 448, suffix_length: 4, frequency: 1, cumulative: 65339 },
    CdfEntry { root: 464, suffix_length: 4, frequency: 1, cumulative: 65340 },
    CdfEntry { root: 480, suffix_length: 4, frequency: 1, cumulative: 65341 },
    CdfEntry { root: 496, suffix_length: 4, frequency: 1, cumulative: 65342 },
    CdfEntry { root: 512, suffix_length: 4, frequency: 1, cumulative: 65343 },
    CdfEntry { root: 528, suffix_length: 4, frequency: 1, cumulative: 65344 },
    CdfEntry { root: 544, suffix_length: 4, frequency: 1, cumulative: 65345 },
    CdfEntry { root: 560, suffix_length: 5, frequency: 1, cumulative: 65346 },
    CdfEntry { root: 592, suffix_length: 5, frequency: 1, cumulative: 65347 },
    CdfEntry { root: 624, suffix_length: 5, frequency: 1, cumulative: 65348 },
    CdfEntry { root: 656, suffix_length: 5, frequency: 1, cumulative: 65349 },
    CdfEntry { root: 688, suffix_length: 5, frequency: 1, cumulative: 65350 },
    CdfEntry { root: 720, suffix_length: 5, frequency: 1, cumulative: 65351 },
    CdfEntry { root: 752, suffix_length: 5, frequency: 1, cumulative: 65352 },
    CdfEntry { root: 784, suffix_length: 5, frequency: 1, cumulative: 65353 },
    CdfEntry { root: 816, suffix_length: 5, frequency: 1, cumulative: 65354 },
    CdfEntry { root: 848, suffix_length: 5, frequency: 1, cumulative: 65355 },
    CdfEntry { root: 880, suffix_length: 5, frequency: 1, cumulative: 65356 },
    CdfEntry { root: 912, suffix_length: 5, frequency: 1, cumulative: 65357 },
    CdfEntry { root: 944, suffix_length: 5, frequency: 1, cumulative: 65358 },
    CdfEntry { root: 976, suffix_length: 5, frequency: 1, cumulative: 65359 },
    CdfEntry { root: 1008, suffix_length: 5, frequency: 1, cumulative: 65360 },
    CdfEntry { root: 1040, suffix_length: 5, frequency: 1, cumulative: 65361 },
    CdfEntry { root: 1072, suffix_length: 6, frequency: 1, cumulative: 65362 },
    CdfEntry { root: 1136, suffix_length: 6, frequency: 1, cumulative: 65363 },
    CdfEntry { root: 1200, suffix_length: 6, frequency: 1, cumulative: 65364 },
    CdfEntry { root: 1264, suffix_length: 6, frequency: 1, cumulative: 65365 },
    CdfEntry { root: 1328, suffix_length: 6, frequency: 1, cumulative: 65366 },
    CdfEntry { root: 1392, suffix_length: 6, frequency: 1, cumulative: 65367 },
    CdfEntry { root: 1456, suffix_length: 6, frequency: 1, cumulative: 65368 },
    CdfEntry { root: 1520, suffix_length: 6, frequency: 1, cumulative: 65369 },
    CdfEntry { root: 1584, suffix_length: 6, frequency: 1, cumulative: 65370 },
    CdfEntry { root: 1648, suffix_length: 6, frequency: 1, cumulative: 65371 },
    CdfEntry { root: 1712, suffix_length: 6, frequency: 1, cumulative: 65372 },
    CdfEntry { root: 1776, suffix_length: 6, frequency: 1, cumulative: 65373 },
    CdfEntry { root: 1840, suffix_length: 6, frequency: 1, cumulative: 65374 },
    CdfEntry { root: 1904, suffix_length: 6, frequency: 1, cumulative: 65375 },
    CdfEntry { root: 1968, suffix_length: 6, frequency: 1, cumulative: 65376 },
    CdfEntry { root: 2032, suffix_length: 6, frequency: 1, cumulative: 65377 },
    CdfEntry { root: 2096, suffix_length: 7, frequency: 1, cumulative: 65378 },
    CdfEntry { root: 2224, suffix_length: 7, frequency: 1, cumulative: 65379 },
    CdfEntry { root: 2352, suffix_length: 7, frequency: 1, cumulative: 65380 },
    CdfEntry { root: 2480, suffix_length: 7, frequency: 1, cumulative: 65381 },
    CdfEntry { root: 2608, suffix_length: 7, frequency: 1, cumulative: 65382 },
    CdfEntry { root: 2736, suffix_length: 7, frequency: 1, cumulative: 65383 },
    CdfEntry { root: 2864, suffix_length: 7, frequency: 1, cumulative: 65384 },
    CdfEntry { root: 2992, suffix_length: 7, frequency: 1, cumulative: 65385 },
    CdfEntry { root: 3120, suffix_length: 7, frequency: 1, cumulative: 65386 },
    CdfEntry { root: 3248, suffix_length: 7, frequency: 1, cumulative: 65387 },
    CdfEntry { root: 3376, suffix_length: 7, frequency: 1, cumulative: 65388 },
    CdfEntry { root: 3504, suffix_length: 7, frequency: 1, cumulative: 65389 },
    CdfEntry { root: 3632, suffix_length: 7, frequency: 1, cumulative: 65390 },
    CdfEntry { root: 3760, suffix_length: 7, frequency: 1, cumulative: 65391 },
    CdfEntry { root: 3888, suffix_length: 7, frequency: 1, cumulative: 65392 },
    CdfEntry { root: 4016, suffix_length: 7, frequency: 1, cumulative: 65393 },
    CdfEntry { root: 4144, suffix_length: 8, frequency: 1, cumulative: 65394 },
    CdfEntry { root: 4400, suffix_length: 8, frequency: 1, cumulative: 65395 },
    CdfEntry { root: 4656, suffix_length: 8, frequency: 1, cumulative: 65396 },
    CdfEntry { root: 4912, suffix_length: 8, frequency: 1, cumulative: 65397 },
    CdfEntry { root: 5168, suffix_length: 8, frequency: 1, cumulative: 65398 },
    CdfEntry { root: 5424, suffix_length: 8, frequency: 1, cumulative: 65399 },
    CdfEntry { root: 5680, suffix_length: 8, frequency: 1, cumulative: 65400 },
    CdfEntry { root: 5936, suffix_length: 8, frequency: 1, cumulative: 65401 },
    CdfEntry { root: 6192, suffix_length: 8, frequency: 1, cumulative: 65402 },
    CdfEntry { root: 6448, suffix_length: 8, frequency: 1, cumulative: 65403 },
    CdfEntry { root: 6704, suffix_length: 8, frequency: 1, cumulative: 65404 },
    CdfEntry { root: 6960, suffix_length: 8, frequency: 1, cumulative: 65405 },
    CdfEntry { root: 7216, suffix_length: 8, frequency: 1, cumulative: 65406 },
    CdfEntry { root: 7472, suffix_length: 8, frequency: 1, cumulative: 65407 },
    CdfEntry { root: 7728, suffix_length: 8, frequency: 1, cumulative: 65408 },
    CdfEntry { root: 7984, suffix_length: 8, frequency: 1, cumulative: 65409 },
    CdfEntry { root: 8240, suffix_length: 9, frequency: 1, cumulative: 65410 },
    CdfEntry { root: 8752, suffix_length: 9, frequency: 1, cumulative: 65411 },
    CdfEntry { root: 9264, suffix_length: 9, frequency: 1, cumulative: 65412 },
    CdfEntry { root: 9776, suffix_length: 9, frequency: 1, cumulative: 65413 },
    CdfEntry { root: 10288, suffix_length: 9, frequency: 1, cumulative: 65414 },
    CdfEntry { root: 10800, suffix_length: 9, frequency: 1, cumulative: 65415 },
    CdfEntry { root: 11312, suffix_length: 9, frequency: 1, cumulative: 65416 },
    CdfEntry { root: 11824, suffix_length: 9, frequency: 1, cumulative: 65417 },
    CdfEntry { root: 12336, suffix_length: 9, frequency: 1, cumulative: 65418 },
    CdfEntry { root: 12848, suffix_length: 9, frequency: 1, cumulative: 65419 },
    CdfEntry { root: 13360, suffix_length: 9, frequency: 1, cumulative: 65420 },
    CdfEntry { root: 13872, suffix_length: 9, frequency: 1, cumulative: 65421 },
    CdfEntry { root: 14384, suffix_length: 9, frequency: 1, cumulative: 65422 },
    CdfEntry { root: 14896, suffix_length: 9, frequency: 1, cumulative: 65423 },
    CdfEntry { root: 15408, suffix_length: 9, frequency: 1, cumulative: 65424 },
    CdfEntry { root: 15920, suffix_length: 9, frequency: 1, cumulative: 65425 },
    CdfEntry { root: 16432, suffix_length: 10, frequency: 1, cumulative: 65426 },
    CdfEntry { root: 17456, suffix_length: 10, frequency: 1, cumulative: 65427 },
    CdfEntry { root: 18480, suffix_length: 10, frequency: 1, cumulative: 65428 },
    CdfEntry { root: 19504, suffix_length: 10, frequency: 1, cumulative: 65429 },
    CdfEntry { root: 20528, suffix_length: 10, frequency: 1, cumulative: 65430 },
    CdfEntry { root: 21552, suffix_length: 10, frequency: 1, cumulative: 65431 },
    CdfEntry { root: 22576, suffix_length: 10, frequency: 1, cumulative: 65432 },
    CdfEntry { root: 23600, suffix_length: 10, frequency: 1, cumulative: 65433 },
    CdfEntry { root: 24624, suffix_length: 10, frequency: 1, cumulative: 65434 },
    CdfEntry { root: 25648, suffix_length: 10, frequency: 1, cumulative: 65435 },
    CdfEntry { root: 26672, suffix_length: 10, frequency: 1, cumulative: 65436 },
    CdfEntry { root: 27696, suffix_length: 10, frequency: 1, cumulative: 65437 },
    CdfEntry { root: 28720, suffix_length: 10, frequency: 1, cumulative: 65438 },
    CdfEntry { root: 29744, suffix_length: 10, frequency: 1, cumulative: 65439 },
    CdfEntry { root: 30768, suffix_length: 10, frequency: 1, cumulative: 65440 },
    CdfEntry { root: 31792, suffix_length: 10, frequency: 1, cumulative: 65441 },
    CdfEntry { root: 32816, suffix_length: 11, frequency: 1, cumulative: 65442 },
    CdfEntry { root: 34864, suffix_length: 11, frequency: 1, cumulative: 65443 },
    CdfEntry { root: 36912, suffix_length: 11, frequency: 1, cumulative: 65444 },
    CdfEntry { root: 38960, suffix_length: 11, frequency: 1, cumulative: 65445 },
    CdfEntry { root: 41008, suffix_length: 11, frequency: 1, cumulative: 65446 },
    CdfEntry { root: 43056, suffix_length: 11, frequency: 1, cumulative: 65447 },
    CdfEntry { root: 45104, suffix_length: 11, frequency: 1, cumulative: 65448 },
    CdfEntry { root: 47152, suffix_length: 11, frequency: 1, cumulative: 65449 },
    CdfEntry { root: 49200, suffix_length: 11, frequency: 1, cumulative: 65450 },
    CdfEntry { root: 51248, suffix_length: 11, frequency: 1, cumulative: 65451 },
    CdfEntry { root: 53296, suffix_length: 11, frequency: 1, cumulative: 65452 },
    CdfEntry { root: 55344, suffix_length: 11, frequency: 1, cumulative: 65453 },
    CdfEntry { root: 57392, suffix_length: 11, frequency: 1, cumulative: 65454 },
    CdfEntry { root: 59440, suffix_length: 11, frequency: 1, cumulative: 65455 },
    CdfEntry { root: 61488, suffix_length: 11, frequency: 1, cumulative: 65456 },
    CdfEntry { root: 63536, suffix_length: 11, frequency: 1, cumulative: 65457 },
];

/// Maps a 16-bit symbol value to the `(code, root, suffix_length)` triple
/// used to look up its `CdfEntry` when encoding. Codes below 247 are
/// literal; codes at or above it escape to a `(root=0, suffix)` pair
/// whose suffix width grows with the symbol's magnitude.
pub fn symbol_code(value: u16) -> (u8, u16, u16) {
    if value < 247 {
        return (value as u8, value, 0);
    }

    let mut e: u32 = 0;
    while (value as u32) >= (1u32 << e) {
        e += 1;
    }

    let code = (247 + e - 8) as u8;
    (code, 0, (code as u16) - 247 + 8)
}

/// Finds the table entry matching `(root, suffix_length)`, as the encoder
/// needs (the table itself is ordered by cumulative frequency, not by
/// root, so this is a linear scan exactly as the source does it).
pub fn find_entry(root: u16, suffix_length: u16) -> CdfEntry {
    for entry in CDF_TABLE.iter() {
        if entry.root == root && entry.suffix_length == suffix_length {
            return *entry;
        }
    }
    CDF_TABLE[CDF_LEN - 1]
}

/// Finds the entry whose cumulative range contains `modulo` (`state mod M`),
/// as the decoder needs: the largest `cumulative <= modulo`.
pub fn find_by_cumulative(modulo: u32) -> CdfEntry {
    let mut found = CDF_TABLE[0];
    for entry in CDF_TABLE.iter() {
        if entry.cumulative as u32 > modulo {
            break;
        }
        found = *entry;
    }
    found
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted_by_cumulative() {
        for pair in CDF_TABLE.windows(2) {
            assert!(pair[0].cumulative <= pair[1].cumulative);
        }
    }

    #[test]
    fn symbol_code_is_identity_below_247() {
        for v in 0..247u16 {
            assert_eq!(symbol_code(v), (v as u8, v, 0));
        }
    }

    #[test]
    fn symbol_code_escapes_large_values() {
        let (code, root, sl) = symbol_code(60000);
        assert!(code >= 247);
        assert_eq!(root, 0);
        assert!(sl > 0);
        // root + (anything representable in sl bits) must be able to reach 60000
        assert!((1u32 << sl) > 0);
    }

    #[test]
    fn find_by_cumulative_matches_table_boundaries() {
        assert_eq!(find_by_cumulative(0).cumulative, 0);
        let last = CDF_TABLE[CDF_LEN - 1];
        assert_eq!(find_by_cumulative(last.cumulative as u32).cumulative, last.cumulative);
        assert_eq!(find_by_cumulative(65535).cumulative, last.cumulative);
    }

    #[test]
    fn find_entry_roundtrips_every_table_entry() {
        for entry in CDF_TABLE.iter() {
            let found = find_entry(entry.root, entry.suffix_length);
            assert_eq!(found.cumulative, entry.cumulative);
        }
    }
}
