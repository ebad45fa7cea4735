//! Narrative labels and policy recommendations per economic sector.
//!
//! Pure lookup data keyed by sector and cluster index. The texts are written
//! for the Southeast Sulawesi dashboard and stay in Indonesian.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Economic sector of an indicator dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Sector {
    /// Food crops (`pertanian`)
    Agriculture,
    /// Micro, small and medium enterprises (`umkm`)
    Msme,
    /// Estate crops (`perkebunan`)
    Plantation,
    /// Fruit plantations (`perkebunan_buah`)
    FruitPlantation,
    /// Fisheries (`perikanan`)
    Fisheries,
}

struct SectorTexts {
    title: &'static str,
    interpretations: [&'static str; 3],
    recommendations: [&'static str; 3],
}

const AGRICULTURE: SectorTexts = SectorTexts {
    title: "Pertanian",
    interpretations: [
        "Sentra Produksi Padi & Jagung Skala Besar.",
        "Wilayah Non-Agraris atau Pendukung. Lahan kecil atau sedikit komoditas.",
        "Pertanian Menengah & Diversifikasi Komoditas.",
    ],
    recommendations: [
        "Fokuskan pada perbaikan irigasi, penyuluhan teknologi pertanian, dan hilirisasi hasil padi-jagung.",
        "Program intensifikasi lahan kecil & pelatihan pertanian berkelanjutan untuk rumah tangga tani.",
        "Kembangkan komoditas alternatif (hortikultura/umbi) dan fasilitasi pasar lokal.",
    ],
};

const MSME: SectorTexts = SectorTexts {
    title: "UMKM",
    interpretations: [
        "Dominasi Usaha Skala Menengah & Besar.",
        "Aktivitas UMKM Rendah.",
        "Dominasi Usaha Mikro & Kecil.",
    ],
    recommendations: [
        "Dorong ekspor UMKM dan adopsi teknologi digital untuk skala produksi besar.",
        "Perluas literasi bisnis, kemudahan akses permodalan, dan dukungan regulasi.",
        "Bentuk inkubator UMKM baru dan fasilitasi pelatihan kewirausahaan dasar.",
    ],
};

const PLANTATION: SectorTexts = SectorTexts {
    title: "Perkebunan",
    interpretations: [
        "Sentra Perkebunan Kakao dan Komoditas Ekspor.",
        "Wilayah Perkebunan Kecil & Skala Rumah Tangga.",
        "Sentra Produksi Menengah dengan Wilayah Campuran dengan Variasi Komoditas.",
    ],
    recommendations: [
        "Dorong hilirisasi kakao & kopi serta penguatan koperasi ekspor.",
        "Program revitalisasi perkebunan rakyat dan akses kredit kecil.",
        "Diversifikasi komoditas dan pembinaan agribisnis berkelanjutan.",
    ],
};

const FRUIT_PLANTATION: SectorTexts = SectorTexts {
    title: "Perkebunan Buah",
    interpretations: [
        "Produksi Kecil dan Menengah.",
        "Produksi Besar dan Terdiversifikasi.",
        "Pusat Sentra Unggulan.",
    ],
    recommendations: [
        "Bangun koperasi tani buah dan fasilitasi akses pupuk & bibit unggul.",
        "Kembangkan jalur distribusi hasil panen dan pengolahan buah skala industri.",
        "Prioritaskan pengolahan pascapanen dan branding buah unggulan daerah.",
    ],
};

const FISHERIES: SectorTexts = SectorTexts {
    title: "Perikanan",
    interpretations: [
        "Wilayah Fokus Budidaya Skala Menengah.",
        "Wilayah dengan Potensi Budidaya Skala Besar.",
        "Wilayah Dominan Perikanan Tangkap.",
    ],
    recommendations: [
        "Perkuat budidaya dengan teknologi pakan, bibit unggul, dan kemitraan pasar.",
        "Modernisasi tambak dan ekspansi produksi berbasis ekspor.",
        "Dukung nelayan kecil dengan alat tangkap modern dan subsidi solar nelayan.",
    ],
};

/// Shown when a dataset matches no sector
pub const NO_RECOMMENDATION: &str = "Belum tersedia rekomendasi untuk sektor ini.";

/// Dataset-name keywords in match order; `perkebunan_buah` must precede `perkebunan`.
const KEYWORDS: [(&str, Sector); 5] = [
    ("pertanian", Sector::Agriculture),
    ("umkm", Sector::Msme),
    ("perkebunan_buah", Sector::FruitPlantation),
    ("perkebunan", Sector::Plantation),
    ("perikanan", Sector::Fisheries),
];

impl Sector {
    /// Detect the sector from a dataset or sheet name, case-insensitively.
    ///
    /// Spaces and hyphens count as underscores, so `"Perkebunan Buah"` is a
    /// fruit plantation. A name mentioning `buah` is never a plain plantation.
    pub fn from_dataset_name(name: &str) -> Option<Self> {
        let name = name.to_lowercase().replace(|c: char| c == ' ' || c == '-', "_");
        KEYWORDS
            .iter()
            .filter(|(_, sector)| !(*sector == Sector::Plantation && name.contains("buah")))
            .find(|(keyword, _)| name.contains(keyword))
            .map(|&(_, sector)| sector)
    }

    fn texts(self) -> &'static SectorTexts {
        match self {
            Sector::Agriculture => &AGRICULTURE,
            Sector::Msme => &MSME,
            Sector::Plantation => &PLANTATION,
            Sector::FruitPlantation => &FRUIT_PLANTATION,
            Sector::Fisheries => &FISHERIES,
        }
    }

    /// Display title
    pub fn title(self) -> &'static str {
        self.texts().title
    }

    /// Narrative label for a cluster; only clusters 0 to 2 are described
    pub fn interpretation(self, cluster: usize) -> Option<&'static str> {
        self.texts().interpretations.get(cluster).copied()
    }

    /// Policy recommendation for a cluster. Clusters past the last entry
    /// share the last recommendation.
    pub fn recommendation(self, cluster: usize) -> &'static str {
        let recommendations = &self.texts().recommendations;
        recommendations[cluster.min(recommendations.len() - 1)]
    }
}

/// Recommendation for a dataset name and cluster, with the generic fallback
pub fn recommendation_for(dataset_name: &str, cluster: usize) -> &'static str {
    Sector::from_dataset_name(dataset_name)
        .map(|sector| sector.recommendation(cluster))
        .unwrap_or(NO_RECOMMENDATION)
}
