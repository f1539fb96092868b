use std::collections::{BTreeSet, HashMap};

/// Built-in skill -> subskill edge table. Both ends are lowercased when the
/// taxonomy is built, so lookups stay case-insensitive.
const BUILTIN_EDGES: &[(&str, &str)] = &[
    // foundations
    ("Computer Science", "Algorithms"),
    ("Computer Science", "Data Structures"),
    ("Computer Science", "Design Patterns"),
    ("Design Patterns", "MVC"),
    ("Design Patterns", "Singleton"),
    ("Design Patterns", "Microservices"),
    ("Computer Science", "Git"),
    // languages
    ("Programming", "Python"),
    ("Programming", "JavaScript"),
    ("Programming", "Java"),
    ("Programming", "C++"),
    ("Programming", "Go"),
    ("Programming", "Rust"),
    ("Programming", "TypeScript"),
    // web, frontend
    ("Web Development", "HTML"),
    ("Web Development", "CSS"),
    ("CSS", "Sass"),
    ("CSS", "Tailwind"),
    ("Web Development", "JavaScript"),
    ("JavaScript", "TypeScript"),
    ("JavaScript", "React"),
    ("React", "Next.js"),
    ("React", "Redux"),
    ("JavaScript", "Vue.js"),
    ("Vue.js", "Nuxt.js"),
    ("JavaScript", "Angular"),
    ("Web Development", "Web Accessibility"),
    // web, backend
    ("Backend Development", "API Design"),
    ("API Design", "REST"),
    ("API Design", "GraphQL"),
    ("Backend Development", "Python"),
    ("Python", "Django"),
    ("Python", "FastAPI"),
    ("Python", "Flask"),
    ("Backend Development", "Node.js"),
    ("Node.js", "Express.js"),
    ("Node.js", "NestJS"),
    ("Backend Development", "Java"),
    ("Java", "Spring Boot"),
    ("Backend Development", "Go"),
    ("Go", "Gin"),
    // mobile
    ("Mobile Development", "iOS"),
    ("iOS", "Swift"),
    ("iOS", "SwiftUI"),
    ("Mobile Development", "Android"),
    ("Android", "Kotlin"),
    ("Android", "Jetpack Compose"),
    ("Mobile Development", "Cross-Platform"),
    ("Cross-Platform", "React Native"),
    ("Cross-Platform", "Flutter"),
    // data science
    ("Data Science", "Python"),
    ("Data Science", "Statistics"),
    ("Python", "NumPy"),
    ("Python", "Pandas"),
    ("Data Science", "Machine Learning"),
    ("Machine Learning", "Scikit-Learn"),
    ("Machine Learning", "Deep Learning"),
    ("Deep Learning", "TensorFlow"),
    ("Deep Learning", "PyTorch"),
    ("Deep Learning", "Keras"),
    ("Data Science", "Data Visualization"),
    ("Data Visualization", "Matplotlib"),
    ("Data Visualization", "Seaborn"),
    ("Data Visualization", "Tableau"),
    ("Machine Learning", "NLP"),
    ("NLP", "HuggingFace"),
    ("NLP", "OpenAI API"),
    // databases
    ("Databases", "SQL"),
    ("SQL", "PostgreSQL"),
    ("SQL", "MySQL"),
    ("SQL", "SQLite"),
    ("Databases", "NoSQL"),
    ("NoSQL", "MongoDB"),
    ("NoSQL", "Redis"),
    ("NoSQL", "Cassandra"),
    ("Databases", "Graph DB"),
    ("Graph DB", "Neo4j"),
    // devops and cloud
    ("DevOps", "CI/CD"),
    ("CI/CD", "Jenkins"),
    ("CI/CD", "GitHub Actions"),
    ("CI/CD", "GitLab CI"),
    ("DevOps", "Containerization"),
    ("Containerization", "Docker"),
    ("Containerization", "Kubernetes"),
    ("DevOps", "Infrastructure as Code"),
    ("Infrastructure as Code", "Terraform"),
    ("Infrastructure as Code", "Ansible"),
    ("Cloud Computing", "AWS"),
    ("AWS", "EC2"),
    ("AWS", "S3"),
    ("AWS", "Lambda"),
    ("Cloud Computing", "Azure"),
    ("Cloud Computing", "Google Cloud"),
    // cybersecurity
    ("Cybersecurity", "Network Security"),
    ("Cybersecurity", "Penetration Testing"),
    ("Penetration Testing", "Kali Linux"),
    ("Penetration Testing", "Metasploit"),
    ("Cybersecurity", "App Security"),
    ("App Security", "OWASP Top 10"),
    ("Cybersecurity", "Cryptography"),
];

/// Skills directly connected to a looked-up skill: broader skills it falls
/// under and narrower skills beneath it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SkillRelatives {
    pub parents: BTreeSet<String>,
    pub children: BTreeSet<String>,
}

impl SkillRelatives {
    /// True when any of the given skills is a direct parent or child.
    pub fn contains_any(&self, skills: &BTreeSet<String>) -> bool {
        skills
            .iter()
            .any(|s| self.parents.contains(s) || self.children.contains(s))
    }
}

/// Directed graph of skill -> subskill relations with lookups in both
/// directions. Immutable once built; the assignment engine receives it by
/// reference.
#[derive(Debug, Clone)]
pub struct SkillTaxonomy {
    parents: HashMap<String, BTreeSet<String>>,
    children: HashMap<String, BTreeSet<String>>,
}

impl Default for SkillTaxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

impl SkillTaxonomy {
    /// Build the taxonomy from the compiled-in edge table.
    pub fn builtin() -> Self {
        Self::from_edges(BUILTIN_EDGES.iter().copied())
    }

    /// Build a taxonomy from arbitrary (parent, child) pairs. Edge strings
    /// are lowercased; duplicate pairs collapse into one edge.
    pub fn from_edges<I, S>(edges: I) -> Self
    where
        I: IntoIterator<Item = (S, S)>,
        S: AsRef<str>,
    {
        let mut parents: HashMap<String, BTreeSet<String>> = HashMap::new();
        let mut children: HashMap<String, BTreeSet<String>> = HashMap::new();
        for (parent, child) in edges {
            let parent = parent.as_ref().to_lowercase();
            let child = child.as_ref().to_lowercase();
            children.entry(parent.clone()).or_default().insert(child.clone());
            parents.entry(child.clone()).or_default().insert(parent.clone());
            // Register both endpoints as known skills even when one side
            // never gains relatives in that direction.
            parents.entry(parent).or_default();
            children.entry(child).or_default();
        }
        Self { parents, children }
    }

    /// Parents and children of a skill, or `None` when the skill is not in
    /// the taxonomy. Lookup is case-insensitive.
    pub fn relatives(&self, skill: &str) -> Option<SkillRelatives> {
        let key = skill.to_lowercase();
        if !self.parents.contains_key(&key) {
            return None;
        }
        Some(SkillRelatives {
            parents: self.parents.get(&key).cloned().unwrap_or_default(),
            children: self.children.get(&key).cloned().unwrap_or_default(),
        })
    }

    /// True when the skill appears anywhere in the taxonomy.
    pub fn contains(&self, skill: &str) -> bool {
        self.parents.contains_key(&skill.to_lowercase())
    }

    /// Number of distinct skills.
    pub fn skill_count(&self) -> usize {
        self.parents.len()
    }

    /// Number of distinct parent -> child edges.
    pub fn edge_count(&self) -> usize {
        self.children.values().map(|c| c.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_lookup_python() {
        let tax = SkillTaxonomy::builtin();
        let rel = tax.relatives("python").unwrap();
        assert!(rel.parents.contains("programming"));
        assert!(rel.parents.contains("backend development"));
        assert!(rel.parents.contains("data science"));
        assert!(rel.children.contains("django"));
        assert!(rel.children.contains("numpy"));
    }

    #[test]
    fn lookup_is_case_insensitive() {
        let tax = SkillTaxonomy::builtin();
        assert_eq!(tax.relatives("Python"), tax.relatives("python"));
        assert!(tax.contains("REACT"));
    }

    #[test]
    fn unknown_skill_returns_none() {
        let tax = SkillTaxonomy::builtin();
        assert_eq!(tax.relatives("underwater basket weaving"), None);
        assert!(!tax.contains("underwater basket weaving"));
    }

    #[test]
    fn leaf_and_root_skills_resolve() {
        let tax = SkillTaxonomy::builtin();

        let leaf = tax.relatives("neo4j").unwrap();
        assert_eq!(leaf.parents.iter().collect::<Vec<_>>(), ["graph db"]);
        assert!(leaf.children.is_empty());

        let root = tax.relatives("devops").unwrap();
        assert!(root.parents.is_empty());
        assert!(root.children.contains("ci/cd"));
        assert!(root.children.contains("containerization"));
    }

    #[test]
    fn from_edges_builds_both_directions() {
        let tax = SkillTaxonomy::from_edges([("Welding", "TIG"), ("Welding", "MIG")]);
        let rel = tax.relatives("tig").unwrap();
        assert!(rel.parents.contains("welding"));
        assert!(rel.children.is_empty());
        assert_eq!(tax.skill_count(), 3);
        assert_eq!(tax.edge_count(), 2);
    }

    #[test]
    fn duplicate_edges_collapse() {
        let tax = SkillTaxonomy::from_edges([("a", "b"), ("A", "B")]);
        assert_eq!(tax.edge_count(), 1);
        assert_eq!(tax.skill_count(), 2);
    }

    #[test]
    fn contains_any_matches_relatives() {
        let tax = SkillTaxonomy::builtin();
        let rel = tax.relatives("react").unwrap();

        let mut skills = BTreeSet::new();
        skills.insert("javascript".to_string());
        assert!(rel.contains_any(&skills));

        let mut unrelated = BTreeSet::new();
        unrelated.insert("cryptography".to_string());
        assert!(!rel.contains_any(&unrelated));
    }

    #[test]
    fn builtin_size() {
        let tax = SkillTaxonomy::builtin();
        assert_eq!(tax.edge_count(), 100);
        assert_eq!(tax.skill_count(), 104);
    }
}
