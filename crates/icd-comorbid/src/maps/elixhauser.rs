//! Quan-Elixhauser code tables (Quan et al., Med Care 2005;43:1130-9).

use super::CategoryTable;

/// ICD-9 Elixhauser categories.
pub(super) const ICD9: &[CategoryTable] = &[
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
        "CardiacArrhythmia",
        &[
            ("426.0", "426.0"),
            ("426.10", "426.10"),
            ("426.12", "426.13"),
            ("426.7", "426.7"),
            ("426.9", "426.9"),
            ("427.0", "427.4"),
            ("427.6", "427.9"),
            ("785.0", "785.0"),
            ("996.01", "996.01"),
            ("996.04", "996.04"),
            ("V45.0", "V45.0"),
            ("V53.3", "V53.3"),
        ],
    ),
    (
        "ValvularDisease",
        &[
            ("093.2", "093.2"),
            ("394", "397.9"),
            ("424", "424.9"),
            ("746.3", "746.6"),
            ("V42.2", "V42.2"),
            ("V43.3", "V43.3"),
        ],
    ),
    (
        "PulmonaryCirculation",
        &[
            ("415.0", "415.1"),
            ("416", "416.9"),
            ("417.0", "417.0"),
            ("417.8", "417.9"),
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
    ("HypertensionUncomplicated", &[("401", "401.9")]),
    ("HypertensionComplicated", &[("402", "405.9")]),
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
        "OtherNeurological",
        &[
            ("331.9", "331.9"),
            ("332.0", "332.1"),
            ("333.4", "333.5"),
            ("333.92", "333.92"),
            ("334", "335.9"),
            ("336.2", "336.2"),
            ("340", "341.9"),
            ("345", "345.9"),
            ("348.1", "348.1"),
            ("348.3", "348.3"),
            ("780.3", "780.3"),
            ("784.3", "784.3"),
        ],
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
    ("DiabetesUncomplicated", &[("250.0", "250.3")]),
    ("DiabetesComplicated", &[("250.4", "250.9")]),
    (
        "Hypothyroidism",
        &[
            ("240.9", "240.9"),
            ("243", "244.9"),
            ("246.1", "246.1"),
            ("246.8", "246.8"),
        ],
    ),
    (
        "RenalFailure",
        &[
            ("403.01", "403.01"),
            ("403.11", "403.11"),
            ("403.91", "403.91"),
            ("404.02", "404.03"),
            ("404.12", "404.13"),
            ("404.92", "404.93"),
            ("585", "586.9"),
            ("588.0", "588.0"),
            ("V42.0", "V42.0"),
            ("V45.1", "V45.1"),
            ("V56", "V56.9"),
        ],
    ),
    (
        "LiverDisease",
        &[
            ("070.22", "070.23"),
            ("070.32", "070.33"),
            ("070.44", "070.44"),
            ("070.54", "070.54"),
            ("070.6", "070.6"),
            ("070.9", "070.9"),
            ("456.0", "456.2"),
            ("570", "571.9"),
            ("572.2", "572.8"),
            ("573.3", "573.4"),
            ("573.8", "573.9"),
            ("V42.7", "V42.7"),
        ],
    ),
    (
        "PepticUlcer",
        &[
            ("531.7", "531.7"),
            ("531.9", "531.9"),
            ("532.7", "532.7"),
            ("532.9", "532.9"),
            ("533.7", "533.7"),
            ("533.9", "533.9"),
            ("534.7", "534.7"),
            ("534.9", "534.9"),
        ],
    ),
    ("HivAids", &[("042", "044.9")]),
    (
        "Lymphoma",
        &[
            ("200", "202.9"),
            ("203.0", "203.0"),
            ("238.6", "238.6"),
        ],
    ),
    ("MetastaticCancer", &[("196", "199.9")]),
    (
        "SolidTumor",
        &[("140", "172.9"), ("174", "195.9")],
    ),
    (
        "RheumatoidArthritis",
        &[
            ("446", "446.9"),
            ("701.0", "701.0"),
            ("710.0", "710.4"),
            ("710.8", "710.9"),
            ("711.2", "711.2"),
            ("714", "714.9"),
            ("719.3", "719.3"),
            ("720", "720.9"),
            ("725", "725.9"),
            ("728.5", "728.5"),
            ("728.89", "728.89"),
            ("729.30", "729.30"),
        ],
    ),
    (
        "Coagulopathy",
        &[
            ("286", "286.9"),
            ("287.1", "287.1"),
            ("287.3", "287.5"),
        ],
    ),
    ("Obesity", &[("278.0", "278.0")]),
    (
        "WeightLoss",
        &[("260", "263.9"), ("783.2", "783.2"), ("799.4", "799.4")],
    ),
    (
        "FluidElectrolyte",
        &[("253.6", "253.6"), ("276", "276.9")],
    ),
    ("BloodLossAnemia", &[("280.0", "280.0")]),
    (
        "DeficiencyAnemia",
        &[("280.1", "280.9"), ("281", "281.9")],
    ),
    (
        "AlcoholAbuse",
        &[
            ("265.2", "265.2"),
            ("291.1", "291.3"),
            ("291.5", "291.9"),
            ("303.0", "303.0"),
            ("303.9", "303.9"),
            ("305.0", "305.0"),
            ("357.5", "357.5"),
            ("425.5", "425.5"),
            ("535.3", "535.3"),
            ("571.0", "571.3"),
            ("980", "980.9"),
            ("V11.3", "V11.3"),
        ],
    ),
    (
        "DrugAbuse",
        &[
            ("292", "292.9"),
            ("304", "304.9"),
            ("305.2", "305.9"),
            ("V65.42", "V65.42"),
        ],
    ),
    (
        "Psychoses",
        &[
            ("293.8", "293.8"),
            ("295", "295.9"),
            ("296.04", "296.04"),
            ("296.14", "296.14"),
            ("296.44", "296.44"),
            ("296.54", "296.54"),
            ("297", "298.9"),
        ],
    ),
    (
        "Depression",
        &[
            ("296.2", "296.3"),
            ("296.5", "296.5"),
            ("300.4", "300.4"),
            ("309", "309.9"),
            ("311", "311.9"),
        ],
    ),
];

/// ICD-10 Elixhauser categories.
pub(super) const ICD10: &[CategoryTable] = &[
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
        "CardiacArrhythmia",
        &[
            ("I44.1", "I44.3"),
            ("I45.6", "I45.6"),
            ("I45.9", "I45.9"),
            ("I47", "I49.9"),
            ("R00.0", "R00.1"),
            ("R00.8", "R00.8"),
            ("T82.1", "T82.1"),
            ("Z45.0", "Z45.0"),
            ("Z95.0", "Z95.0"),
        ],
    ),
    (
        "ValvularDisease",
        &[
            ("A52.0", "A52.0"),
            ("I05", "I08.9"),
            ("I09.1", "I09.1"),
            ("I09.8", "I09.8"),
            ("I34", "I39.9"),
            ("Q23.0", "Q23.3"),
            ("Z95.2", "Z95.4"),
        ],
    ),
    (
        "PulmonaryCirculation",
        &[
            ("I26", "I27.9"),
            ("I28.0", "I28.0"),
            ("I28.8", "I28.9"),
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
    ("HypertensionUncomplicated", &[("I10", "I10.9")]),
    (
        "HypertensionComplicated",
        &[("I11", "I13.9"), ("I15", "I15.9")],
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
        "OtherNeurological",
        &[
            ("G10", "G13.9"),
            ("G20", "G22.9"),
            ("G25.4", "G25.5"),
            ("G31.2", "G31.2"),
            ("G31.8", "G31.9"),
            ("G32", "G32.9"),
            ("G35", "G37.9"),
            ("G40", "G41.9"),
            ("G93.1", "G93.1"),
            ("G93.4", "G93.4"),
            ("R47.0", "R47.0"),
            ("R56", "R56.9"),
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
        "DiabetesUncomplicated",
        &[
            ("E10.0", "E10.1"),
            ("E10.9", "E10.9"),
            ("E11.0", "E11.1"),
            ("E11.9", "E11.9"),
            ("E12.0", "E12.1"),
            ("E12.9", "E12.9"),
            ("E13.0", "E13.1"),
            ("E13.9", "E13.9"),
            ("E14.0", "E14.1"),
            ("E14.9", "E14.9"),
        ],
    ),
    (
        "DiabetesComplicated",
        &[
            ("E10.2", "E10.8"),
            ("E11.2", "E11.8"),
            ("E12.2", "E12.8"),
            ("E13.2", "E13.8"),
            ("E14.2", "E14.8"),
        ],
    ),
    (
        "Hypothyroidism",
        &[("E00", "E03.9"), ("E89.0", "E89.0")],
    ),
    (
        "RenalFailure",
        &[
            ("I12.0", "I12.0"),
            ("I13.1", "I13.1"),
            ("N18", "N19.9"),
            ("N25.0", "N25.0"),
            ("Z49.0", "Z49.2"),
            ("Z94.0", "Z94.0"),
            ("Z99.2", "Z99.2"),
        ],
    ),
    (
        "LiverDisease",
        &[
            ("B18", "B18.9"),
            ("I85", "I85.9"),
            ("I86.4", "I86.4"),
            ("I98.2", "I98.2"),
            ("K70", "K70.9"),
            ("K71.1", "K71.1"),
            ("K71.3", "K71.5"),
            ("K71.7", "K71.7"),
            ("K72", "K74.9"),
            ("K76.0", "K76.0"),
            ("K76.2", "K76.9"),
            ("Z94.4", "Z94.4"),
        ],
    ),
    (
        "PepticUlcer",
        &[
            ("K25.7", "K25.7"),
            ("K25.9", "K25.9"),
            ("K26.7", "K26.7"),
            ("K26.9", "K26.9"),
            ("K27.7", "K27.7"),
            ("K27.9", "K27.9"),
            ("K28.7", "K28.7"),
            ("K28.9", "K28.9"),
        ],
    ),
    ("HivAids", &[("B20", "B22.9"), ("B24", "B24.9")]),
    (
        "Lymphoma",
        &[
            ("C81", "C85.9"),
            ("C88", "C88.9"),
            ("C90.0", "C90.0"),
            ("C90.2", "C90.2"),
            ("C96", "C96.9"),
        ],
    ),
    ("MetastaticCancer", &[("C77", "C80.9")]),
    (
        "SolidTumor",
        &[
            ("C00", "C26.9"),
            ("C30", "C34.9"),
            ("C37", "C41.9"),
            ("C43", "C43.9"),
            ("C45", "C58.9"),
            ("C60", "C76.9"),
            ("C97", "C97.9"),
        ],
    ),
    (
        "RheumatoidArthritis",
        &[
            ("L94.0", "L94.1"),
            ("L94.3", "L94.3"),
            ("M05", "M06.9"),
            ("M08", "M08.9"),
            ("M12.0", "M12.0"),
            ("M12.3", "M12.3"),
            ("M30", "M30.9"),
            ("M31.0", "M31.3"),
            ("M32", "M35.9"),
            ("M45", "M45.9"),
            ("M46.1", "M46.1"),
            ("M46.8", "M46.9"),
        ],
    ),
    (
        "Coagulopathy",
        &[
            ("D65", "D68.9"),
            ("D69.1", "D69.1"),
            ("D69.3", "D69.6"),
        ],
    ),
    ("Obesity", &[("E66", "E66.9")]),
    (
        "WeightLoss",
        &[
            ("E40", "E46.9"),
            ("R63.4", "R63.4"),
            ("R64", "R64.9"),
        ],
    ),
    (
        "FluidElectrolyte",
        &[("E22.2", "E22.2"), ("E86", "E87.9")],
    ),
    ("BloodLossAnemia", &[("D50.0", "D50.0")]),
    (
        "DeficiencyAnemia",
        &[("D50.8", "D50.9"), ("D51", "D53.9")],
    ),
    (
        "AlcoholAbuse",
        &[
            ("E52", "E52.9"),
            ("F10", "F10.9"),
            ("G62.1", "G62.1"),
            ("I42.6", "I42.6"),
            ("K29.2", "K29.2"),
            ("K70.0", "K70.0"),
            ("K70.3", "K70.3"),
            ("K70.9", "K70.9"),
            ("T51", "T51.9"),
            ("Z50.2", "Z50.2"),
            ("Z71.4", "Z71.4"),
            ("Z72.1", "Z72.1"),
        ],
    ),
    (
        "DrugAbuse",
        &[
            ("F11", "F16.9"),
            ("F18", "F19.9"),
            ("Z71.5", "Z71.5"),
            ("Z72.2", "Z72.2"),
        ],
    ),
    (
        "Psychoses",
        &[
            ("F20", "F20.9"),
            ("F22", "F25.9"),
            ("F28", "F29.9"),
            ("F30.2", "F30.2"),
            ("F31.2", "F31.2"),
            ("F31.5", "F31.5"),
        ],
    ),
    (
        "Depression",
        &[
            ("F20.4", "F20.4"),
            ("F31.3", "F31.5"),
            ("F32", "F33.9"),
            ("F34.1", "F34.1"),
            ("F41.2", "F41.2"),
            ("F43.2", "F43.2"),
        ],
    ),
];
