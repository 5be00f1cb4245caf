//! Quan-Charlson code tables (Quan et al., Med Care 2005;43:1130-9).

use super::CategoryTable;

/// ICD-9 Charlson categories.
pub(super) const ICD9: &[CategoryTable] = &[
    ("MyocardialInfarction", &[("410", "410.9"), ("412", "412")]),
    (
        "CongestiveHeartFailure",
        &[
            ("398.91", "398.91"),
            ("402.01", "402.01"),
            ("402.11", "402.11"),
            ("402.91", "402.91"),
            ("404.01", "404.01"),
            ("404.03", "404.03"),
            ("404.11", "404.11"),
            ("404.13", "404.13"),
            ("404.91", "404.91"),
            ("404.93", "404.93"),
            ("425.4", "425.9"),
            ("428", "428.9"),
        ],
    ),
    (
        "PeripheralVascular",
        &[
            ("093.0", "093.0"),
            ("437.3", "437.3"),
            ("440", "440.9"),
            ("441", "441.9"),
            ("443.1", "443.9"),
            ("447.1", "447.1"),
            ("557.1", "557.1"),
            ("557.9", "557.9"),
            ("V43.4", "V43.4"),
        ],
    ),
    (
        "Cerebrovascular",
        &[("362.34", "362.34"), ("430", "438.9")],
    ),
    (
        "Dementia",
        &[("290", "290.9"), ("294.1", "294.1"), ("331.2", "331.2")],
    ),
    (
        "ChronicPulmonary",
        &[
            ("416.8", "416.9"),
            ("490", "505.9"),
            ("506.4", "506.4"),
            ("508.1", "508.1"),
            ("508.8", "508.8"),
        ],
    ),
    (
        "RheumaticDisease",
        &[
            ("446.5", "446.5"),
            ("710.0", "710.4"),
            ("714.0", "714.2"),
            ("714.8", "714.8"),
            ("725", "725.9"),
        ],
    ),
    ("PepticUlcer", &[("531", "534.9")]),
    (
        "LiverMild",
        &[
            ("070.22", "070.23"),
            ("070.32", "070.33"),
            ("070.44", "070.44"),
            ("070.54", "070.54"),
            ("070.6", "070.6"),
            ("070.9", "070.9"),
            ("570", "571.9"),
            ("573.3", "573.4"),
            ("573.8", "573.9"),
            ("V42.7", "V42.7"),
        ],
    ),
    (
        "DiabetesUncomplicated",
        &[("250.0", "250.3"), ("250.8", "250.9")],
    ),
    ("DiabetesComplicated", &[("250.4", "250.7")]),
    (
        "Paralysis",
        &[
            ("334.1", "334.1"),
            ("342", "343.9"),
            ("344.0", "344.6"),
            ("344.9", "344.9"),
        ],
    ),
    (
        "RenalDisease",
        &[
            ("403.01", "403.01"),
            ("403.11", "403.11"),
            ("403.91", "403.91"),
            ("404.02", "404.03"),
            ("404.12", "404.13"),
            ("404.92", "404.93"),
            ("582", "582.9"),
            ("583.0", "583.7"),
            ("585", "586.9"),
            ("588.0", "588.0"),
            ("V42.0", "V42.0"),
            ("V45.1", "V45.1"),
            ("V56", "V56.9"),
        ],
    ),
    (
        "Cancer",
        &[
            ("140", "172.9"),
            ("174", "195.8"),
            ("200", "208.9"),
            ("238.6", "238.6"),
        ],
    ),
    (
        "LiverSevere",
        &[("456.0", "456.2"), ("572.2", "572.8")],
    ),
    ("MetastaticCancer", &[("196", "199.9")]),
    ("HivAids", &[("042", "044.9")]),
];

/// ICD-10 Charlson categories.
pub(super) const ICD10: &[CategoryTable] = &[
    (
        "MyocardialInfarction",
        &[("I21", "I22.9"), ("I25.2", "I25.2")],
    ),
    (
        "CongestiveHeartFailure",
        &[
            ("I09.9", "I09.9"),
            ("I11.0", "I11.0"),
            ("I13.0", "I13.0"),
            ("I13.2", "I13.2"),
            ("I25.5", "I25.5"),
            ("I42.0", "I42.0"),
            ("I42.5", "I42.9"),
            ("I43", "I43.9"),
            ("I50", "I50.9"),
            ("P29.0", "P29.0"),
        ],
    ),
    (
        "PeripheralVascular",
        &[
            ("I70", "I71.9"),
            ("I73.1", "I73.1"),
            ("I73.8", "I73.9"),
            ("I77.1", "I77.1"),
            ("I79.0", "I79.0"),
            ("I79.2", "I79.2"),
            ("K55.1", "K55.1"),
            ("K55.8", "K55.9"),
            ("Z95.8", "Z95.9"),
        ],
    ),
    (
        "Cerebrovascular",
        &[("G45", "G46.9"), ("H34.0", "H34.0"), ("I60", "I69.9")],
    ),
    (
        "Dementia",
        &[
            ("F00", "F03.9"),
            ("F05.1", "F05.1"),
            ("G30", "G30.9"),
            ("G31.1", "G31.1"),
        ],
    ),
    (
        "ChronicPulmonary",
        &[
            ("I27.8", "I27.9"),
            ("J40", "J47.9"),
            ("J60", "J67.9"),
            ("J68.4", "J68.4"),
            ("J70.1", "J70.1"),
            ("J70.3", "J70.3"),
        ],
    ),
    (
        "RheumaticDisease",
        &[
            ("M05", "M06.9"),
            ("M31.5", "M31.5"),
            ("M32", "M34.9"),
            ("M35.1", "M35.1"),
            ("M35.3", "M35.3"),
            ("M36.0", "M36.0"),
        ],
    ),
    ("PepticUlcer", &[("K25", "K28.9")]),
    (
        "LiverMild",
        &[
            ("B18", "B18.9"),
            ("K70.0", "K70.3"),
            ("K70.9", "K70.9"),
            ("K71.3", "K71.5"),
            ("K71.7", "K71.7"),
            ("K73", "K74.9"),
            ("K76.0", "K76.0"),
            ("K76.2", "K76.4"),
            ("K76.8", "K76.9"),
            ("Z94.4", "Z94.4"),
        ],
    ),
    (
        "DiabetesUncomplicated",
        &[
            ("E10.0", "E10.1"),
            ("E10.6", "E10.6"),
            ("E10.8", "E10.9"),
            ("E11.0", "E11.1"),
            ("E11.6", "E11.6"),
            ("E11.8", "E11.9"),
            ("E12.0", "E12.1"),
            ("E12.6", "E12.6"),
            ("E12.8", "E12.9"),
            ("E13.0", "E13.1"),
            ("E13.6", "E13.6"),
            ("E13.8", "E13.9"),
            ("E14.0", "E14.1"),
            ("E14.6", "E14.6"),
            ("E14.8", "E14.9"),
        ],
    ),
    (
        "DiabetesComplicated",
        &[
            ("E10.2", "E10.5"),
            ("E10.7", "E10.7"),
            ("E11.2", "E11.5"),
            ("E11.7", "E11.7"),
            ("E12.2", "E12.5"),
            ("E12.7", "E12.7"),
            ("E13.2", "E13.5"),
            ("E13.7", "E13.7"),
            ("E14.2", "E14.5"),
            ("E14.7", "E14.7"),
        ],
    ),
    (
        "Paralysis",
        &[
            ("G04.1", "G04.1"),
            ("G11.4", "G11.4"),
            ("G80.1", "G80.2"),
            ("G81", "G82.9"),
            ("G83.0", "G83.4"),
            ("G83.9", "G83.9"),
        ],
    ),
    (
        "RenalDisease",
        &[
            ("I12.0", "I12.0"),
            ("I13.1", "I13.1"),
            ("N03.2", "N03.7"),
            ("N05.2", "N05.7"),
            ("N18", "N19.9"),
            ("N25.0", "N25.0"),
            ("Z49.0", "Z49.2"),
            ("Z94.0", "Z94.0"),
            ("Z99.2", "Z99.2"),
        ],
    ),
    (
        "Cancer",
        &[
            ("C00", "C26.9"),
            ("C30", "C34.9"),
            ("C37", "C41.9"),
            ("C43", "C43.9"),
            ("C45", "C58.9"),
            ("C60", "C76.9"),
            ("C81", "C85.9"),
            ("C88", "C88.9"),
            ("C90", "C97.9"),
        ],
    ),
    (
        "LiverSevere",
        &[
            ("I85.0", "I85.0"),
            ("I85.9", "I85.9"),
            ("I86.4", "I86.4"),
            ("I98.2", "I98.2"),
            ("K70.4", "K70.4"),
            ("K71.1", "K71.1"),
            ("K72.1", "K72.1"),
            ("K72.9", "K72.9"),
            ("K76.5", "K76.7"),
        ],
    ),
    ("MetastaticCancer", &[("C77", "C80.9")]),
    ("HivAids", &[("B20", "B22.9"), ("B24", "B24.9")]),
];
