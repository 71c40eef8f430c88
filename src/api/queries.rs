//! GraphQL documents sent to the content API
//!
//! Kept verbatim in one place so the wire contract is auditable at a glance.

/// Category list: top-level categories only, the built-in default excluded,
/// ordered by description (the site uses the description field for ordering).
pub const LIST_CATEGORIES: &str = r#"
query GetFilteredCategories {
  categories(where: { parent: null, exclude: "1", orderby: DESCRIPTION, order: ASC }) {
    nodes {
      name
      slug
      postsPerPage
      showInMenu
    }
  }
}"#;

/// One page of posts for a category, cursor-paginated
pub const LIST_POSTS: &str = r#"
query GetPostsPerCategories($categoryName: String, $first: Int, $after: String) {
  posts(where: { categoryName: $categoryName }, first: $first, after: $after) {
    nodes {
      author {
        node {
          name
        }
      }
      title
      content
      date
      modified
      slug
      status
      link
    }
    pageInfo {
      endCursor
      hasNextPage
    }
  }
}"#;

/// Post count and page count for a category at a given page size
pub const INFO_POSTS: &str = r#"
query GetPostsCategoryInfos($categoryName: String, $postsPerPage: Int) {
  postsCategoryInfos(categoryName: $categoryName, postsPerPage: $postsPerPage) {
    postsCountByCategoryName
    postsPagesByCategoryName
  }
}"#;

/// Single post by slug, with featured image for the detail view
pub const GET_POST_BY_SLUG: &str = r#"
query GetPostBySlug($slug: String!) {
  postBy(slug: $slug) {
    author {
      node {
        name
      }
    }
    title
    content
    date
    modified
    slug
    status
    link
    featuredImage {
      node {
        sourceUrl
        altText
      }
    }
  }
}"#;

/// Site title, description, and icon
pub const SITE_INFO: &str = r#"
query SiteInfo {
  allSettings {
    generalSettingsTitle
    generalSettingsDescription
  }
  siteIconLink
}"#;

/// Media items matched by slug, used for category background images
pub const LIST_BACKGROUND_IMAGES: &str = r#"
query GetMedia($slugs: [String!]) {
  mediaItems(where: { nameIn: $slugs }) {
    nodes {
      link
      caption
      slug
    }
  }
}"#;

/// Identity of the bearer-token holder
pub const VIEWER: &str = r#"
query Viewer {
  viewer {
    id
    name
    email
  }
}"#;

/// Credentials to auth token
pub const LOGIN: &str = r#"
mutation Login($username: String!, $password: String!) {
  login(input: { username: $username, password: $password }) {
    authToken
  }
}"#;

/// New account registration
pub const REGISTER: &str = r#"
mutation RegisterUser($username: String!, $email: String!, $password: String!) {
  registerUser(input: { username: $username, email: $email, password: $password }) {
    user {
      id
      name
    }
  }
}"#;
