//! Ten taxa with NCBI style lineages, shared by the integration tests

#![allow(dead_code)]

pub const IDENTS: [&str; 10] = [
    "Homo sapiens",
    "Pongo pongo",
    "Mus musculus",
    "Bacillus subtilus",
    "Gorilla gorilla",
    "Ailuropoda melanoleuca",
    "Ailurus fulgens",
    "Arabidopsis thaliana",
    "Macca mulatta",
    "Chlorotalpa tytonis",
];

pub fn ranks() -> Vec<Vec<&'static str>> {
    vec![
        vec![
            "superkingdom", "", "kingdom", "", "", "", "", "phylum", "subphylum", "",
            "superclass", "", "", "", "", "", "class", "", "", "superorder", "order",
            "suborder", "infraorder", "parvorder", "superfamily", "family", "subfamily",
            "genus", "species",
        ],
        vec![
            "superkingdom", "", "kingdom", "", "", "", "", "phylum", "subphylum", "",
            "superclass", "", "", "", "", "", "class", "", "", "superorder", "order",
            "suborder", "infraorder", "parvorder", "superfamily", "family", "subfamily",
            "genus",
        ],
        vec![
            "superkingdom", "", "kingdom", "", "", "", "", "phylum", "subphylum", "",
            "superclass", "", "", "", "", "", "class", "", "", "superorder", "", "order",
            "suborder", "", "family", "subfamily", "genus", "subgenus", "species",
        ],
        vec![
            "superkingdom", "phylum", "class", "order", "family", "genus", "species group",
            "species",
        ],
        vec![
            "superkingdom", "", "kingdom", "", "", "", "", "phylum", "subphylum", "",
            "superclass", "", "", "", "", "", "class", "", "", "superorder", "order",
            "suborder", "infraorder", "parvorder", "superfamily", "family", "subfamily",
            "genus", "species",
        ],
        vec![
            "superkingdom", "", "kingdom", "", "", "", "", "phylum", "subphylum", "",
            "superclass", "", "", "", "", "", "class", "", "", "superorder", "order",
            "suborder", "family", "genus", "species",
        ],
        vec![
            "superkingdom", "", "kingdom", "", "", "", "", "phylum", "subphylum", "",
            "superclass", "", "", "", "", "", "class", "", "", "superorder", "order",
            "suborder", "family", "genus", "species",
        ],
        vec![
            "superkingdom", "kingdom", "phylum", "", "", "", "", "", "", "", "", "subclass", "",
            "order", "family", "tribe", "genus", "species",
        ],
        vec![
            "superkingdom", "", "kingdom", "", "", "", "", "phylum", "subphylum", "",
            "superclass", "", "", "", "", "", "class", "", "", "superorder", "order",
            "suborder", "infraorder", "parvorder", "superfamily", "family", "subfamily",
            "genus", "species",
        ],
        vec![
            "superkingdom", "", "kingdom", "", "", "", "", "phylum", "subphylum", "",
            "superclass", "", "", "", "", "", "class", "", "", "superorder", "family", "genus",
        ],
    ]
}

pub fn lineages() -> Vec<Vec<&'static str>> {
    vec![
        vec![
            "Eukaryota", "Opisthokonta", "Metazoa", "Eumetazoa", "Bilateria", "Coelomata",
            "Deuterostomia", "Chordata", "Craniata", "Vertebrata", "Gnathostomata",
            "Teleostomi", "Euteleostomi", "Sarcopterygii", "Tetrapoda", "Amniota", "Mammalia",
            "Theria", "Eutheria", "Euarchontoglires", "Primates", "Haplorrhini", "Simiiformes",
            "Catarrhini", "Hominoidea", "Hominidae", "Homininae", "Homo", "Homo sapiens",
        ],
        vec![
            "Eukaryota", "Opisthokonta", "Metazoa", "Eumetazoa", "Bilateria", "Coelomata",
            "Deuterostomia", "Chordata", "Craniata", "Vertebrata", "Gnathostomata",
            "Teleostomi", "Euteleostomi", "Sarcopterygii", "Tetrapoda", "Amniota", "Mammalia",
            "Theria", "Eutheria", "Euarchontoglires", "Primates", "Haplorrhini", "Simiiformes",
            "Catarrhini", "Hominoidea", "Hominidae", "Ponginae", "Pongo",
        ],
        vec![
            "Eukaryota", "Opisthokonta", "Metazoa", "Eumetazoa", "Bilateria", "Coelomata",
            "Deuterostomia", "Chordata", "Craniata", "Vertebrata", "Gnathostomata",
            "Teleostomi", "Euteleostomi", "Sarcopterygii", "Tetrapoda", "Amniota", "Mammalia",
            "Theria", "Eutheria", "Euarchontoglires", "Glires", "Rodentia", "Sciurognathi",
            "Muroidea", "Muridae", "Murinae", "Mus", "Mus", "Mus musculus",
        ],
        vec![
            "Bacteria", "Firmicutes", "Bacilli", "Bacillales", "Bacillaceae", "Bacillus",
            "Bacillus subtilis", "Bacillus subtilis",
        ],
        vec![
            "Eukaryota", "Opisthokonta", "Metazoa", "Eumetazoa", "Bilateria", "Coelomata",
            "Deuterostomia", "Chordata", "Craniata", "Vertebrata", "Gnathostomata",
            "Teleostomi", "Euteleostomi", "Sarcopterygii", "Tetrapoda", "Amniota", "Mammalia",
            "Theria", "Eutheria", "Euarchontoglires", "Primates", "Haplorrhini", "Simiiformes",
            "Catarrhini", "Hominoidea", "Hominidae", "Homininae", "Gorilla", "Gorilla gorilla",
        ],
        vec![
            "Eukaryota", "Opisthokonta", "Metazoa", "Eumetazoa", "Bilateria", "Coelomata",
            "Deuterostomia", "Chordata", "Craniata", "Vertebrata", "Gnathostomata",
            "Teleostomi", "Euteleostomi", "Sarcopterygii", "Tetrapoda", "Amniota", "Mammalia",
            "Theria", "Eutheria", "Laurasiatheria", "Carnivora", "Caniformia", "Ursidae",
            "Ailuropoda", "Ailuropoda melanoleuca",
        ],
        vec![
            "Eukaryota", "Opisthokonta", "Metazoa", "Eumetazoa", "Bilateria", "Coelomata",
            "Deuterostomia", "Chordata", "Craniata", "Vertebrata", "Gnathostomata",
            "Teleostomi", "Euteleostomi", "Sarcopterygii", "Tetrapoda", "Amniota", "Mammalia",
            "Theria", "Eutheria", "Laurasiatheria", "Carnivora", "Caniformia", "Ailuridae",
            "Ailurus", "Ailurus fulgens",
        ],
        vec![
            "Eukaryota", "Viridiplantae", "Streptophyta", "Streptophytina", "Embryophyta",
            "Tracheophyta", "Euphyllophyta", "Spermatophyta", "Magnoliophyta", "", "", "", "",
            "Brassicales", "Brassicaceae", "Camelineae", "Arabidopsis", "Arabidopsis thaliana",
        ],
        vec![
            "Eukaryota", "Opisthokonta", "Metazoa", "Eumetazoa", "Bilateria", "Coelomata",
            "Deuterostomia", "Chordata", "Craniata", "Vertebrata", "Gnathostomata",
            "Teleostomi", "Euteleostomi", "Sarcopterygii", "Tetrapoda", "Amniota", "Mammalia",
            "Theria", "Eutheria", "Euarchontoglires", "Primates", "Haplorrhini", "Simiiformes",
            "Catarrhini", "Cercopithecoidea", "Cercopithecidae", "Cercopithecinae", "Macaca",
            "Macaca mulatta",
        ],
        vec![
            "Eukaryota", "Opisthokonta", "Metazoa", "Eumetazoa", "Bilateria", "Coelomata",
            "Deuterostomia", "Chordata", "Craniata", "Vertebrata", "Gnathostomata",
            "Teleostomi", "Euteleostomi", "Sarcopterygii", "Tetrapoda", "Amniota", "Mammalia",
            "Theria", "Eutheria", "Afrotheria", "Chrysochloridae", "Chlorotalpa",
        ],
    ]
}
